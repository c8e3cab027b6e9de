// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory content provider.
//
// Lets a desktop shell (or a test) register byte blobs under content URIs
// and have them resolved exactly like OS-managed content.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use webintent_core::error::{Result, WebIntentError};
use webintent_core::ContentUri;

use crate::mime::StaticMimeTable;
use crate::traits::{columns, ContentResolver, MetadataRow, MimeTypeMap};

/// One registered piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEntry {
    pub display_name: Option<String>,
    pub mime_type: Option<String>,
    /// `None` makes the entry unreadable: opening it fails.
    pub bytes: Option<Vec<u8>>,
    /// Whether metadata queries succeed for this entry.
    pub queryable: bool,
}

impl MemoryEntry {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            display_name: None,
            mime_type: None,
            bytes: Some(bytes.into()),
            queryable: true,
        }
    }

    /// An entry whose byte stream cannot be opened.
    pub fn unreadable() -> Self {
        Self {
            queryable: true,
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Make metadata queries for this entry fail.
    pub fn without_metadata(mut self) -> Self {
        self.queryable = false;
        self
    }
}

/// [`ContentResolver`] and [`MimeTypeMap`] over registered entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: BTreeMap<String, MemoryEntry>,
    mimes: StaticMimeTable,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, uri: impl Into<String>, entry: MemoryEntry) -> Self {
        self.insert(uri, entry);
        self
    }

    /// Register `entry` under `uri`, replacing any previous entry.
    pub fn insert(&mut self, uri: impl Into<String>, entry: MemoryEntry) -> Option<MemoryEntry> {
        self.entries.insert(uri.into(), entry)
    }

    pub fn remove(&mut self, uri: &str) -> Option<MemoryEntry> {
        self.entries.remove(uri)
    }

    fn entry(&self, uri: &ContentUri) -> Result<&MemoryEntry> {
        self.entries
            .get(uri.as_str())
            .ok_or_else(|| WebIntentError::InvalidReference(format!("no content at {uri}")))
    }
}

impl ContentResolver for MemoryProvider {
    fn query(&self, uri: &ContentUri) -> Result<Vec<MetadataRow>> {
        let entry = self.entry(uri)?;
        if !entry.queryable {
            return Err(WebIntentError::MetadataQuery(format!(
                "provider returned no cursor for {uri}"
            )));
        }

        let mut row = MetadataRow::new();
        if let Some(name) = &entry.display_name {
            row.insert(columns::DISPLAY_NAME, Some(name.clone()));
        }
        row.insert(
            columns::SIZE,
            entry.bytes.as_ref().map(|bytes| bytes.len().to_string()),
        );
        Ok(vec![row])
    }

    fn open_input(&self, uri: &ContentUri) -> Result<Box<dyn Read + Send>> {
        let bytes = self
            .entry(uri)?
            .bytes
            .clone()
            .ok_or_else(|| WebIntentError::InvalidReference(format!("{uri} is not readable")))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn mime_type(&self, uri: &ContentUri) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(uri.as_str())
            .and_then(|entry| entry.mime_type.clone()))
    }
}

impl MimeTypeMap for MemoryProvider {
    fn extension_for_mime(&self, mime_type: &str) -> Option<String> {
        self.mimes.extension_for_mime(mime_type)
    }
}
