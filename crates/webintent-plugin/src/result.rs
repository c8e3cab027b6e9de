// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Results delivered back to the web context, and the sinks that carry them.

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedSender;

use webintent_core::error::{ErrorCode, WebIntentError};

/// Outcome class of a single delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    /// Nothing to report yet; the channel stays open.
    NoResult,
    /// The command was recognised but called with the wrong arguments.
    InvalidAction,
    Error,
}

/// One message sent back over a result channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginResult {
    pub status: Status,
    pub payload: Value,
    /// Whether the channel accepts further deliveries after this one.
    pub keep_callback: bool,
}

impl PluginResult {
    pub fn ok(payload: impl Into<Value>) -> Self {
        Self {
            status: Status::Ok,
            payload: payload.into(),
            keep_callback: false,
        }
    }

    pub fn no_result() -> Self {
        Self {
            status: Status::NoResult,
            payload: Value::Null,
            keep_callback: false,
        }
    }

    /// Error result carrying `{"code", "message"}`. Argument errors use
    /// [`Status::InvalidAction`], everything else [`Status::Error`].
    pub fn error(err: &WebIntentError) -> Self {
        let code = err.code();
        let status = match code {
            ErrorCode::InvalidArgument => Status::InvalidAction,
            _ => Status::Error,
        };
        Self {
            status,
            payload: json!({ "code": code, "message": err.to_string() }),
            keep_callback: false,
        }
    }

    pub fn keep_callback(mut self, keep: bool) -> Self {
        self.keep_callback = keep;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Error code of an error payload, if any.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self.status {
            Status::Ok | Status::NoResult => None,
            Status::InvalidAction | Status::Error => self
                .payload
                .get("code")
                .and_then(|code| serde_json::from_value(code.clone()).ok()),
        }
    }
}

/// Where results for one invocation (or one subscription) go.
pub trait ResultSink: Send + Sync {
    fn deliver(&self, result: PluginResult);
}

impl ResultSink for UnboundedSender<PluginResult> {
    fn deliver(&self, result: PluginResult) {
        if self.send(result).is_err() {
            tracing::debug!("result receiver dropped; delivery discarded");
        }
    }
}

/// Adapts a closure into a [`ResultSink`].
pub struct FnSink<F>(pub F);

impl<F> ResultSink for FnSink<F>
where
    F: Fn(PluginResult) + Send + Sync,
{
    fn deliver(&self, result: PluginResult) {
        (self.0)(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn argument_errors_are_invalid_actions() {
        let result = PluginResult::error(&WebIntentError::InvalidArgument {
            command: "getCurrentMessage",
            expected: 0,
            actual: 1,
        });
        assert_eq!(result.status, Status::InvalidAction);
        assert_eq!(result.error_code(), Some(ErrorCode::InvalidArgument));
        assert_eq!(result.payload["code"], "InvalidArgument");
    }

    #[test]
    fn reference_errors_are_errors() {
        let result = PluginResult::error(&WebIntentError::InvalidReference("gone".into()));
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.error_code(), Some(ErrorCode::InvalidReference));
        assert_eq!(
            result.payload["message"],
            "content reference could not be opened: gone"
        );
    }

    #[test]
    fn serializes_for_the_web_context() {
        let json = serde_json::to_value(PluginResult::no_result().keep_callback(true)).unwrap();
        assert_eq!(
            json,
            json!({ "status": "NO_RESULT", "payload": null, "keepCallback": true })
        );
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        tx.deliver(PluginResult::ok("ignored"));
    }

    #[test]
    fn closure_sink_receives_results() {
        let seen = Mutex::new(Vec::new());
        let sink = FnSink(|result: PluginResult| seen.lock().unwrap().push(result));
        sink.deliver(PluginResult::ok(1));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
