// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! webintent-plugin — the command surface a web-shell host calls into.
//!
//! The host forwards each invocation as a command name, a JSON argument list
//! and a [`ResultSink`]. [`IntentPlugin`] parses the name into a
//! [`Command`], checks its arity, and delivers the outcome to the sink.
//! Messages arriving after launch are pushed to the single subscriber held
//! in a [`SubscriptionSlot`].

pub mod command;
pub mod logging;
pub mod plugin;
pub mod result;
pub mod subscription;

pub use command::Command;
pub use logging::init_logging;
pub use plugin::IntentPlugin;
pub use result::{FnSink, PluginResult, ResultSink, Status};
pub use subscription::SubscriptionSlot;
