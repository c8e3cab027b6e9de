// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where no OS content service exists.
//
// Content references are served from the local filesystem (`file://` URIs
// and absolute paths); `content://` URIs are not resolvable here.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use webintent_core::error::{Result, WebIntentError};
use webintent_core::{ContentUri, Message};

use crate::mime::StaticMimeTable;
use crate::traits::*;

/// Filesystem-backed bridge returned on non-mobile platforms.
#[derive(Debug, Clone, Default)]
pub struct StubBridge {
    files_dir: Option<PathBuf>,
    mimes: StaticMimeTable,
}

impl StubBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` instead of the XDG data directory for materialized files.
    pub fn with_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files_dir = Some(dir.into());
        self
    }

    fn local_path(uri: &ContentUri) -> Result<PathBuf> {
        let raw = uri.as_str();
        let path = match uri.scheme() {
            Some("file") => file_uri_path(uri)?,
            None => raw.to_owned(),
            Some(other) => {
                tracing::warn!(scheme = other, "stub bridge cannot resolve scheme");
                return Err(WebIntentError::PlatformUnavailable);
            }
        };
        let path = PathBuf::from(path);
        if !path.is_absolute() {
            return Err(WebIntentError::InvalidReference(format!(
                "{uri} is not an absolute path"
            )));
        }
        Ok(path)
    }
}

/// Decoded path of a `file:` URI. Only an empty or `localhost` authority
/// names this machine.
fn file_uri_path(uri: &ContentUri) -> Result<String> {
    let rest = &uri.as_str()["file:".len()..];
    let encoded = match rest.strip_prefix("//") {
        Some(authority_and_path) => {
            let (host, path) = authority_and_path
                .find('/')
                .map_or((authority_and_path, ""), |at| authority_and_path.split_at(at));
            if !(host.is_empty() || host.eq_ignore_ascii_case("localhost")) {
                return Err(WebIntentError::InvalidReference(format!(
                    "{uri} names remote host {host}"
                )));
            }
            path
        }
        None => rest,
    };
    let encoded = encoded.split(['?', '#']).next().unwrap_or_default();
    percent_decode(encoded)
        .map_err(|e| WebIntentError::InvalidReference(format!("{uri}: {e}")))
}

/// `%XX` escapes become bytes; a malformed escape stays a literal `%`.
fn percent_decode(raw: &str) -> std::result::Result<String, std::string::FromUtf8Error> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%' && i + 2 < bytes.len())
            .then(|| {
                let hi = (bytes[i + 1] as char).to_digit(16)?;
                let lo = (bytes[i + 2] as char).to_digit(16)?;
                Some((hi * 16 + lo) as u8)
            })
            .flatten();
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl ContentResolver for StubBridge {
    fn query(&self, uri: &ContentUri) -> Result<Vec<MetadataRow>> {
        let path = Self::local_path(uri)?;
        let metadata = std::fs::metadata(&path)
            .map_err(|e| WebIntentError::MetadataQuery(format!("{}: {e}", path.display())))?;

        let row = MetadataRow::new()
            .with_column(
                columns::DISPLAY_NAME,
                path.file_name().map(|n| n.to_string_lossy().into_owned()),
            )
            .with_column(columns::SIZE, Some(metadata.len().to_string()));
        Ok(vec![row])
    }

    fn open_input(&self, uri: &ContentUri) -> Result<Box<dyn Read + Send>> {
        let path = Self::local_path(uri)?;
        let file = File::open(&path)
            .map_err(|e| WebIntentError::InvalidReference(format!("{}: {e}", path.display())))?;
        Ok(Box::new(file))
    }

    fn mime_type(&self, uri: &ContentUri) -> Result<Option<String>> {
        let path = Self::local_path(uri)?;
        Ok(path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.mimes.mime_for_extension(ext))
            .map(str::to_owned))
    }
}

impl MimeTypeMap for StubBridge {
    fn extension_for_mime(&self, mime_type: &str) -> Option<String> {
        self.mimes.extension_for_mime(mime_type)
    }
}

impl HostActivity for StubBridge {
    /// Desktop shells are launched, not sent intents.
    fn current_message(&self) -> Result<Message> {
        Ok(Message::new().with_action("android.intent.action.MAIN"))
    }

    fn files_dir(&self) -> Result<PathBuf> {
        Ok(self.files_dir.clone().unwrap_or_else(data_dir))
    }

    fn supports_clip_data(&self) -> bool {
        false
    }
}

/// XDG data directory (or `~/.local/share`) joined with `webintent`.
fn data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    };
    base.join("webintent")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::Materializer;
    use webintent_core::{BridgeConfig, CopyStrategy};

    #[test]
    fn file_uri_resolves_to_local_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("notes.txt");
        std::fs::write(&source, b"hello").unwrap();
        let uri = ContentUri::parse(&format!("file://{}", source.display())).unwrap();

        let bridge = StubBridge::new();
        let rows = bridge.query(&uri).unwrap();
        assert_eq!(rows[0].get(columns::DISPLAY_NAME), Some(Some("notes.txt")));
        assert_eq!(rows[0].get(columns::SIZE), Some(Some("5")));
        assert_eq!(bridge.mime_type(&uri).unwrap().as_deref(), Some("text/plain"));
    }

    #[test]
    fn file_uri_paths_are_percent_decoded() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("My Scan.png");
        std::fs::write(&source, b"\x89PNG").unwrap();
        let encoded = format!("file://{}/My%20Scan.png", tmp.path().display());

        let bridge = StubBridge::new().with_files_dir(tmp.path().join("app"));
        let files_dir = bridge.files_dir().unwrap();
        let config = BridgeConfig::default();
        let file = Materializer::new(&bridge, &files_dir, &config)
            .materialize(&encoded)
            .unwrap();

        assert_eq!(file.strategy, CopyStrategy::Named);
        assert_eq!(file.path, tmp.path().join("app/openIn/MyScan.png"));
    }

    #[test]
    fn localhost_authority_is_local() {
        let uri = ContentUri::parse("file://localhost/tmp/a%2Bb.txt").unwrap();
        assert_eq!(
            StubBridge::local_path(&uri).unwrap(),
            PathBuf::from("/tmp/a+b.txt")
        );
        let uri = ContentUri::parse("file:/tmp/plain.txt").unwrap();
        assert_eq!(
            StubBridge::local_path(&uri).unwrap(),
            PathBuf::from("/tmp/plain.txt")
        );
    }

    #[test]
    fn remote_file_hosts_are_rejected() {
        let uri = ContentUri::parse("file://fileserver/share/a.txt").unwrap();
        assert!(matches!(
            StubBridge::local_path(&uri),
            Err(WebIntentError::InvalidReference(_))
        ));
    }

    #[test]
    fn malformed_escapes_stay_literal() {
        assert_eq!(percent_decode("100%").unwrap(), "100%");
        assert_eq!(percent_decode("%zz%41").unwrap(), "%zzA");
    }

    #[test]
    fn content_scheme_is_unavailable() {
        let uri = ContentUri::parse("content://media/external/images/1").unwrap();
        assert!(matches!(
            StubBridge::new().open_input(&uri),
            Err(WebIntentError::PlatformUnavailable)
        ));
    }

    #[test]
    fn relative_paths_are_rejected() {
        let uri = ContentUri::parse("relative/file.txt").unwrap();
        assert!(matches!(
            StubBridge::new().query(&uri),
            Err(WebIntentError::InvalidReference(_))
        ));
    }

    #[test]
    fn materializes_local_files() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("My Scan (1).png");
        std::fs::write(&source, b"\x89PNG").unwrap();

        let bridge = StubBridge::new().with_files_dir(tmp.path().join("app"));
        let files_dir = bridge.files_dir().unwrap();
        let config = BridgeConfig::default();
        let file = Materializer::new(&bridge, &files_dir, &config)
            .materialize(source.to_str().unwrap())
            .unwrap();

        assert_eq!(file.strategy, CopyStrategy::Named);
        assert_eq!(file.path, tmp.path().join("app/openIn/MyScan1.png"));
    }

    #[test]
    fn desktop_message_has_no_clip_data() {
        let bridge = StubBridge::new();
        let message = bridge.current_message().unwrap();
        assert_eq!(message.action.as_deref(), Some("android.intent.action.MAIN"));
        assert!(!bridge.supports_clip_data());
    }
}
