// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The closed set of commands a web context may invoke.

use std::str::FromStr;

use serde_json::Value;

use webintent_core::error::{Result, WebIntentError};

/// Commands exposed to the calling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Translate the message that launched the activity.
    GetCurrentMessage,
    /// Keep a channel open for every later incoming message.
    SubscribeToIncomingMessages,
    /// Copy a content URI into a local file and return its path.
    MaterializeContentReference,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::GetCurrentMessage,
        Command::SubscribeToIncomingMessages,
        Command::MaterializeContentReference,
    ];

    /// Look a command up by name. Legacy Cordova plugin names are accepted
    /// as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getCurrentMessage" | "getCordovaIntent" => Some(Self::GetCurrentMessage),
            "subscribeToIncomingMessages" | "setNewIntentHandler" => {
                Some(Self::SubscribeToIncomingMessages)
            }
            "materializeContentReference" | "getRealPathFromContentUrl" => {
                Some(Self::MaterializeContentReference)
            }
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetCurrentMessage => "getCurrentMessage",
            Self::SubscribeToIncomingMessages => "subscribeToIncomingMessages",
            Self::MaterializeContentReference => "materializeContentReference",
        }
    }

    /// Exact number of arguments the command takes.
    pub fn arity(self) -> usize {
        match self {
            Self::GetCurrentMessage => 0,
            // The argument's value is ignored; it only marks the registration.
            Self::SubscribeToIncomingMessages => 1,
            Self::MaterializeContentReference => 1,
        }
    }

    pub fn check_arity(self, args: &[Value]) -> Result<()> {
        if args.len() == self.arity() {
            Ok(())
        } else {
            Err(WebIntentError::InvalidArgument {
                command: self.name(),
                expected: self.arity(),
                actual: args.len(),
            })
        }
    }
}

impl FromStr for Command {
    type Err = WebIntentError;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| WebIntentError::UnknownCommand(name.to_owned()))
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn legacy_names_are_aliases() {
        assert_eq!(
            "getCordovaIntent".parse::<Command>().unwrap(),
            Command::GetCurrentMessage
        );
        assert_eq!(
            "setNewIntentHandler".parse::<Command>().unwrap(),
            Command::SubscribeToIncomingMessages
        );
        assert_eq!(
            "getRealPathFromContentUrl".parse::<Command>().unwrap(),
            Command::MaterializeContentReference
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            "deleteEverything".parse::<Command>(),
            Err(WebIntentError::UnknownCommand(name)) if name == "deleteEverything"
        ));
    }

    #[test]
    fn arity_is_exact() {
        assert!(Command::GetCurrentMessage.check_arity(&[]).is_ok());
        assert!(Command::GetCurrentMessage.check_arity(&[json!(1)]).is_err());
        assert!(Command::SubscribeToIncomingMessages.check_arity(&[]).is_err());
        assert!(
            Command::MaterializeContentReference
                .check_arity(&[json!("a"), json!("b")])
                .is_err()
        );
    }
}
