// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical structured-data rendering of a message.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// JSON object produced by translating a [`crate::Message`].
///
/// Keys keep their insertion order, so two translations of the same message
/// serialize to identical text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insertion_order_survives_serialization() {
        let mut map = Map::new();
        map.insert("type".into(), json!("text/plain"));
        map.insert("action".into(), json!("VIEW"));
        map.insert("flags".into(), json!(0));
        let doc = Document::from(map);

        assert_eq!(doc.keys().collect::<Vec<_>>(), ["type", "action", "flags"]);
        assert_eq!(
            doc.to_json_string().unwrap(),
            r#"{"type":"text/plain","action":"VIEW","flags":0}"#
        );
    }
}
