// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for webintent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all webintent operations.
#[derive(Debug, Error)]
pub enum WebIntentError {
    // -- Command boundary --
    #[error("{command} expects {expected} argument(s), got {actual}")]
    InvalidArgument {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    // -- Content references --
    #[error("content reference could not be opened: {0}")]
    InvalidReference(String),

    #[error("metadata query failed: {0}")]
    MetadataQuery(String),

    #[error("metadata row has no `{0}` column")]
    MissingColumn(String),

    // -- Translation --
    #[error("native field access failed: {0}")]
    Field(String),

    #[error("document assembly failed: {0}")]
    Assembly(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WebIntentError>;

/// Error taxonomy reported to the calling web context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Wrong argument count at the command boundary.
    InvalidArgument,
    /// Neither copy strategy could open or copy the content reference.
    InvalidReference,
    /// The top-level document could not be built at all.
    AssemblyFailed,
    /// The native platform refused or lacks the capability.
    Platform,
    Internal,
}

impl WebIntentError {
    /// Classify this error for the result payload.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::InvalidReference(_) | Self::MetadataQuery(_) | Self::MissingColumn(_) => {
                ErrorCode::InvalidReference
            }
            Self::Assembly(_) => ErrorCode::AssemblyFailed,
            Self::Bridge(_) | Self::PlatformUnavailable => ErrorCode::Platform,
            Self::UnknownCommand(_)
            | Self::Field(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorCode::Internal,
        }
    }
}
