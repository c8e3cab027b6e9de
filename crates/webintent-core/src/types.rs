// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the inter-application message and its payload.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WebIntentError};

/// Nested key-value payload attached to a [`Message`].
pub type Extras = BTreeMap<String, ExtraValue>;

/// One value inside [`Extras`].
///
/// The set is closed: the native boundary maps every value it does not
/// recognise to [`ExtraValue::Other`] with its string representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    /// A nested key-value container.
    Bundle(Extras),
    /// An ordered array; elements need not share a type.
    Array(Vec<ExtraValue>),
    /// Lossy rendering of a value outside the closed set.
    Other(String),
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ExtraValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Extras> for ExtraValue {
    fn from(value: Extras) -> Self {
        Self::Bundle(value)
    }
}

impl<T: Into<ExtraValue>> From<Vec<T>> for ExtraValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ExtraValue>> From<Option<T>> for ExtraValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One entry of a multi-item (clip data) payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipItem {
    pub html_text: Option<String>,
    pub text: Option<String>,
    /// String form of a nested intent. Kept opaque, never translated.
    pub intent: Option<String>,
    pub uri: Option<String>,
}

/// A clip item as read from the native side.
///
/// Reading an item's fields can fail independently of its siblings; the
/// failure is kept here so the translator can drop just that item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSlot {
    Read(ClipItem),
    Unreadable(String),
}

impl From<ClipItem> for ClipSlot {
    fn from(item: ClipItem) -> Self {
        Self::Read(item)
    }
}

/// One inter-application communication event (an Android `Intent`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub action: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Primary URI reference.
    pub data: Option<String>,
    pub categories: BTreeSet<String>,
    pub flags: i32,
    pub component: Option<String>,
    pub package: Option<String>,
    pub extras: Option<Extras>,
    /// `None` when the platform has no clip capability or the message
    /// carries no clip data.
    pub clip_items: Option<Vec<ClipSlot>>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_data(mut self, uri: impl Into<String>) -> Self {
        self.data = Some(uri.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Insert one extra, creating the extras map on first use.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.extras
            .get_or_insert_with(Extras::new)
            .insert(key.into(), value.into());
        self
    }

    /// Append one clip slot, creating the clip list on first use.
    pub fn with_clip(mut self, slot: impl Into<ClipSlot>) -> Self {
        self.clip_items
            .get_or_insert_with(Vec::new)
            .push(slot.into());
        self
    }
}

/// An OS-mediated handle to a byte stream (`content://...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri(String);

impl ContentUri {
    /// Wrap a URI string. Blank input is rejected as an invalid reference.
    pub fn parse(uri: &str) -> Result<Self> {
        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(WebIntentError::InvalidReference("empty URI".into()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, e.g. `content` or `file`.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once(':')?;
        let valid = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(scheme)
    }
}

impl std::fmt::Display for ContentUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which copy strategy produced a materialized file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyStrategy {
    /// Named after the sanitized display name.
    Named,
    /// Fixed fallback name, metadata skipped.
    Fallback,
}

/// A content reference copied into a directly readable local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFile {
    pub path: PathBuf,
    pub strategy: CopyStrategy,
    pub bytes_copied: u64,
}
