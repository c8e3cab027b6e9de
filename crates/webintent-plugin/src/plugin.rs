// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command dispatch: routes a named invocation to the translator or the
// materializer and reports the outcome through a result sink.

use std::sync::Arc;

use serde_json::Value;

use webintent_bridge::traits::PlatformBridge;
use webintent_bridge::{Materializer, Translator};
use webintent_core::error::{Result, WebIntentError};
use webintent_core::{BridgeConfig, Message};

use crate::command::Command;
use crate::result::{PluginResult, ResultSink};
use crate::subscription::SubscriptionSlot;

/// The plugin instance owned by the host shell for one activity.
pub struct IntentPlugin {
    bridge: Box<dyn PlatformBridge>,
    config: BridgeConfig,
    subscription: SubscriptionSlot,
}

impl IntentPlugin {
    pub fn new(bridge: Box<dyn PlatformBridge>, config: BridgeConfig) -> Self {
        tracing::info!(platform = bridge.platform_name(), "intent plugin ready");
        Self {
            bridge,
            config,
            subscription: SubscriptionSlot::new(),
        }
    }

    /// Plugin backed by [`webintent_bridge::platform_bridge`].
    pub fn for_current_platform(config: BridgeConfig) -> Self {
        Self::new(webintent_bridge::platform_bridge(), config)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn has_subscriber(&self) -> bool {
        self.subscription.is_active()
    }

    /// Run the command named `action`.
    ///
    /// Unknown names return `Err(UnknownCommand)` and deliver nothing.
    /// Every recognised command delivers exactly one result to `sink` and
    /// returns `Ok(())`, including when the command itself failed.
    pub fn execute(&self, action: &str, args: &[Value], sink: Arc<dyn ResultSink>) -> Result<()> {
        let command: Command = action.parse()?;
        tracing::debug!(%command, args = args.len(), "dispatching command");

        if let Err(err) = command.check_arity(args) {
            tracing::warn!(%command, "{err}");
            sink.deliver(PluginResult::error(&err));
            return Ok(());
        }

        match command {
            Command::GetCurrentMessage => sink.deliver(self.current_message()),
            Command::SubscribeToIncomingMessages => {
                self.subscription.register(Arc::clone(&sink));
                sink.deliver(PluginResult::no_result().keep_callback(true));
            }
            Command::MaterializeContentReference => {
                sink.deliver(self.materialize_argument(&args[0]))
            }
        }
        Ok(())
    }

    fn current_message(&self) -> PluginResult {
        match self.bridge.current_message() {
            Ok(message) => self.translate(&message),
            Err(err) => {
                tracing::error!("could not read current message: {err}");
                PluginResult::error(&err)
            }
        }
    }

    fn translate(&self, message: &Message) -> PluginResult {
        match Translator::for_platform(self.bridge.as_ref()).translate(message) {
            Some(document) => PluginResult::ok(document.into_value()),
            None => PluginResult::error(&WebIntentError::Assembly(
                "message could not be converted to a document".into(),
            )),
        }
    }

    fn materialize_argument(&self, arg: &Value) -> PluginResult {
        let Some(uri) = arg.as_str() else {
            return PluginResult::error(&WebIntentError::InvalidReference(format!(
                "expected a content URI string, got {arg}"
            )));
        };
        match self.materialize(uri) {
            Ok(path) => PluginResult::ok(path),
            Err(err) => PluginResult::error(&err),
        }
    }

    /// Copy `uri` into the app's files directory and return the local path.
    pub fn materialize(&self, uri: &str) -> Result<String> {
        let files_dir = self.bridge.files_dir()?;
        let file = Materializer::new(self.bridge.as_ref(), &files_dir, &self.config)
            .materialize(uri)?;
        Ok(file.path.to_string_lossy().into_owned())
    }

    /// Forward a newly delivered message to the current subscriber.
    ///
    /// Returns `false` when there is no subscriber or the message could not
    /// be translated.
    pub fn on_new_message(&self, message: &Message) -> bool {
        let Some(sink) = self.subscription.current() else {
            tracing::debug!("incoming message with no subscriber");
            return false;
        };
        match Translator::for_platform(self.bridge.as_ref()).translate(message) {
            Some(document) => {
                sink.deliver(PluginResult::ok(document.into_value()).keep_callback(true));
                true
            }
            None => false,
        }
    }

    /// Drop the subscriber when the host tears the activity down.
    pub fn teardown(&self) {
        if self.subscription.clear().is_some() {
            tracing::debug!("subscriber released on teardown");
        }
    }
}

impl std::fmt::Debug for IntentPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentPlugin")
            .field("platform", &self.bridge.platform_name())
            .field("config", &self.config)
            .field("subscription", &self.subscription)
            .finish()
    }
}
