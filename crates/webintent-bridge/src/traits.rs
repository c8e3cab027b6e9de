// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native services the bridge
// consumes: content resolution, MIME lookups, and the hosting activity.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use webintent_core::error::Result;
use webintent_core::{ContentUri, Message};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: ContentResolver + MimeTypeMap + HostActivity + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// OS content-resolution service (`android.content.ContentResolver`).
pub trait ContentResolver {
    /// Query the metadata rows describing `uri`.
    fn query(&self, uri: &ContentUri) -> Result<Vec<MetadataRow>>;

    /// Open a fresh readable byte stream for `uri`.
    fn open_input(&self, uri: &ContentUri) -> Result<Box<dyn Read + Send>>;

    /// MIME type of the content behind `uri`, if the provider reports one.
    fn mime_type(&self, uri: &ContentUri) -> Result<Option<String>>;
}

/// MIME type to file extension lookup (`android.webkit.MimeTypeMap`).
pub trait MimeTypeMap {
    /// Extension without the leading dot, e.g. `"pdf"`.
    fn extension_for_mime(&self, mime_type: &str) -> Option<String>;
}

/// The application instance hosting the web shell.
pub trait HostActivity {
    /// The message that launched (or last re-launched) the activity.
    fn current_message(&self) -> Result<Message>;

    /// Root of app-private file storage.
    fn files_dir(&self) -> Result<PathBuf>;

    /// Whether messages on this platform can carry clip data.
    fn supports_clip_data(&self) -> bool;
}

/// Well-known metadata column names (`android.provider.OpenableColumns`).
pub mod columns {
    pub const DISPLAY_NAME: &str = "_display_name";
    pub const SIZE: &str = "_size";
}

/// One metadata row returned by [`ContentResolver::query`].
///
/// Columns map to their string value; `None` is a SQL NULL or a column
/// that could not be rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRow {
    columns: BTreeMap<String, Option<String>>,
}

impl MetadataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.columns.insert(name.into(), value);
    }

    /// `None` if the column is missing, `Some(None)` if it is NULL.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.columns.get(name).map(Option::as_deref)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_differs_from_null_column() {
        let row = MetadataRow::new()
            .with_column("_display_name", Some("a.pdf".into()))
            .with_column("_size", None);

        assert_eq!(row.get("_display_name"), Some(Some("a.pdf")));
        assert_eq!(row.get("_size"), Some(None));
        assert_eq!(row.get("mime_type"), None);
        assert_eq!(row.column_names().count(), 2);
    }
}
