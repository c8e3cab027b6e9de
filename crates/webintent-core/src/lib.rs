// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// webintent — Core types and error definitions shared across all crates.

pub mod config;
pub mod document;
pub mod error;
pub mod types;

pub use config::BridgeConfig;
pub use document::Document;
pub use error::{ErrorCode, WebIntentError};
pub use types::*;
