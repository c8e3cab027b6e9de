// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables shared by the translator and the materializer.
///
/// Every field has a default, so a host may override only what it needs:
/// `{"copy_buffer_size": 65536}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Subdirectory of app-private storage that receives materialized files.
    pub materialize_dir: String,
    /// File name used by the fallback copy strategy.
    pub fallback_file_name: String,
    /// Read buffer for the primary copy strategy, in bytes.
    pub copy_buffer_size: usize,
    /// Metadata column holding the human-readable file name.
    pub display_name_column: String,
    /// Lowest platform API level that carries clip data on intents.
    pub min_clip_data_sdk: i32,
}

impl BridgeConfig {
    /// Parse a JSON override document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.copy_buffer_size = config.copy_buffer_size.max(1);
        Ok(config)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            materialize_dir: "openIn".into(),
            fallback_file_name: "OpenInFile".into(),
            copy_buffer_size: 128 * 1024,
            display_name_column: "_display_name".into(),
            min_clip_data_sdk: 19,
        }
    }
}
