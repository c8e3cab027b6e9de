// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message -> JSON translation.
//
// Translation never aborts on a bad field. Values outside the closed
// `ExtraValue` set were already reduced to strings at the native boundary,
// non-finite doubles become strings here, and a clip item that cannot be
// read or typed is dropped on its own. Only a failure to assemble the
// top-level object yields no document.

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, error, instrument, warn};

use webintent_core::error::{Result, WebIntentError};
use webintent_core::{ClipSlot, ContentUri, Document, ExtraValue, Message};

use crate::traits::{ContentResolver, MimeTypeMap, PlatformBridge};

/// Top-level record. Field order is the emitted key order.
#[derive(Serialize)]
struct MessageRecord<'m> {
    #[serde(rename = "clipItems", skip_serializing_if = "Option::is_none")]
    clip_items: Option<Vec<ClipRecord<'m>>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extras: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<&'m str>>,
    flags: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'m str>,
}

/// `type` and `extension` are `Some` together (possibly holding null) iff
/// the item has a URI.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClipRecord<'m> {
    #[serde(skip_serializing_if = "Option::is_none")]
    html_text: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'m str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<&'m str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    mime_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<Option<String>>,
}

/// Converts messages into canonical [`Document`]s.
///
/// Stateless apart from the borrowed platform services used to type clip
/// item URIs.
pub struct Translator<'a, P: ContentResolver + MimeTypeMap + ?Sized> {
    platform: &'a P,
    clip_data_supported: bool,
}

impl<'a> Translator<'a, dyn PlatformBridge + 'a> {
    /// Translator backed by a full platform bridge, honouring its clip
    /// capability.
    pub fn for_platform(bridge: &'a (dyn PlatformBridge + 'a)) -> Self {
        Self {
            platform: bridge,
            clip_data_supported: bridge.supports_clip_data(),
        }
    }
}

impl<'a, P: ContentResolver + MimeTypeMap + ?Sized> Translator<'a, P> {
    pub fn new(platform: &'a P, clip_data_supported: bool) -> Self {
        Self {
            platform,
            clip_data_supported,
        }
    }

    /// Translate `message`, or return `None` if the top-level document
    /// could not be assembled.
    #[instrument(skip_all, fields(action = message.action.as_deref().unwrap_or("")))]
    pub fn translate(&self, message: &Message) -> Option<Document> {
        let record = MessageRecord {
            clip_items: self.clip_records(message),
            mime_type: message.mime_type.as_deref(),
            extras: message.extras.as_ref().map(|extras| {
                Value::Object(
                    extras
                        .iter()
                        .map(|(key, value)| (key.clone(), normalize(value)))
                        .collect(),
                )
            }),
            action: message.action.as_deref(),
            categories: (!message.categories.is_empty())
                .then(|| message.categories.iter().map(String::as_str).collect()),
            flags: message.flags,
            component: message.component.as_deref(),
            data: message.data.as_deref(),
            package: message.package.as_deref(),
        };

        match serde_json::to_value(&record) {
            Ok(Value::Object(map)) => {
                debug!(keys = map.len(), "message translated");
                Some(Document::from(map))
            }
            Ok(other) => {
                error!(value = %other, "message record did not assemble into an object");
                None
            }
            Err(e) => {
                error!(error = %e, "message record could not be assembled");
                None
            }
        }
    }

    /// Build the clip item list, or `None` if it must be omitted entirely.
    fn clip_records<'m>(&self, message: &'m Message) -> Option<Vec<ClipRecord<'m>>> {
        if !self.clip_data_supported {
            return None;
        }
        let slots = message.clip_items.as_ref()?;

        let records: Vec<_> = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match self.clip_record(slot) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "dropping clip item");
                    None
                }
            })
            .collect();

        (!records.is_empty()).then_some(records)
    }

    fn clip_record<'m>(&self, slot: &'m ClipSlot) -> Result<ClipRecord<'m>> {
        let item = match slot {
            ClipSlot::Read(item) => item,
            ClipSlot::Unreadable(reason) => return Err(WebIntentError::Field(reason.clone())),
        };

        let (mime_type, extension) = match item.uri.as_deref() {
            Some(uri) => {
                let (mime_type, extension) = self.resolve_type(uri)?;
                (Some(mime_type), Some(extension))
            }
            None => (None, None),
        };

        Ok(ClipRecord {
            html_text: item.html_text.as_deref(),
            intent: item.intent.as_deref(),
            text: item.text.as_deref(),
            uri: item.uri.as_deref(),
            mime_type,
            extension,
        })
    }

    /// One MIME lookup feeds both the type and the extension. A URI too
    /// malformed to look up is untyped, not an error.
    fn resolve_type(&self, uri: &str) -> Result<(Option<String>, Option<String>)> {
        let Ok(uri) = ContentUri::parse(uri) else {
            debug!(uri, "clip item URI cannot be typed");
            return Ok((None, None));
        };
        let mime_type = self.platform.mime_type(&uri)?;
        let extension = mime_type
            .as_deref()
            .and_then(|mime| self.platform.extension_for_mime(mime));
        Ok((mime_type, extension))
    }
}

/// Normalize one extras value into JSON.
///
/// Total over its input: containers recurse, scalars pass through, and
/// anything JSON cannot carry falls back to its string form.
pub fn normalize(value: &ExtraValue) -> Value {
    match value {
        ExtraValue::Null => Value::Null,
        ExtraValue::Bool(b) => Value::Bool(*b),
        ExtraValue::Int(i) => Value::from(*i),
        ExtraValue::Long(l) => Value::from(*l),
        ExtraValue::Double(d) => Number::from_f64(*d).map_or_else(
            || {
                debug!(value = %d, "non-finite double degraded to string");
                Value::String(d.to_string())
            },
            Value::Number,
        ),
        ExtraValue::String(s) => Value::String(s.clone()),
        ExtraValue::Bundle(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), normalize(value)))
                .collect(),
        ),
        ExtraValue::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        ExtraValue::Other(repr) => Value::String(repr.clone()),
    }
}
