// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in MIME table for hosts without an OS MIME service.

use crate::traits::MimeTypeMap;

/// `(mime type, canonical extension, other extensions)`.
const TABLE: &[(&str, &str, &[&str])] = &[
    ("application/pdf", "pdf", &[]),
    ("application/zip", "zip", &[]),
    ("application/json", "json", &[]),
    ("application/msword", "doc", &[]),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
        &[],
    ),
    ("image/jpeg", "jpg", &["jpeg"]),
    ("image/png", "png", &[]),
    ("image/gif", "gif", &[]),
    ("image/webp", "webp", &[]),
    ("image/tiff", "tiff", &["tif"]),
    ("text/plain", "txt", &["text"]),
    ("text/html", "html", &["htm"]),
    ("text/csv", "csv", &[]),
    ("audio/mpeg", "mp3", &[]),
    ("video/mp4", "mp4", &[]),
];

/// Static lookup table covering the common document and media types.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMimeTable;

impl StaticMimeTable {
    /// Infer a MIME type from a file extension (case-insensitive).
    pub fn mime_for_extension(&self, extension: &str) -> Option<&'static str> {
        let extension = extension.to_ascii_lowercase();
        TABLE
            .iter()
            .find(|(_, canonical, others)| {
                *canonical == extension || others.contains(&extension.as_str())
            })
            .map(|(mime, _, _)| *mime)
    }
}

impl MimeTypeMap for StaticMimeTable {
    fn extension_for_mime(&self, mime_type: &str) -> Option<String> {
        let mime_type = mime_type.to_ascii_lowercase();
        TABLE
            .iter()
            .find(|(mime, _, _)| *mime == mime_type)
            .map(|(_, canonical, _)| (*canonical).to_owned())
    }
}
