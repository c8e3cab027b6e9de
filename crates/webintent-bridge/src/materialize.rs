// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content URI materialization: copy an OS-resolved byte stream into
// `<files dir>/openIn/` so the web shell can read it as a plain file.
//
// Two strategies run in order. The named strategy looks up the display
// name, sanitizes it, and copies through a large buffer. If anything in it
// fails, the fallback re-opens the stream from scratch and copies it byte
// by byte into a fixed file name. The caller only ever sees one outcome.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use webintent_core::error::{Result, WebIntentError};
use webintent_core::{BridgeConfig, ContentUri, CopyStrategy, MaterializedFile};

use crate::traits::ContentResolver;

/// Copies content references into app-private storage.
pub struct Materializer<'a, R: ContentResolver + ?Sized> {
    resolver: &'a R,
    target_dir: PathBuf,
    config: &'a BridgeConfig,
}

impl<'a, R: ContentResolver + ?Sized> Materializer<'a, R> {
    /// Files land in `files_dir` joined with `config.materialize_dir`.
    pub fn new(resolver: &'a R, files_dir: impl AsRef<Path>, config: &'a BridgeConfig) -> Self {
        Self {
            resolver,
            target_dir: files_dir.as_ref().join(&config.materialize_dir),
            config,
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Copy the content behind `uri` into a local file.
    ///
    /// Fails with [`WebIntentError::InvalidReference`] only after both
    /// strategies failed, in which case no file is left behind.
    #[instrument(skip(self))]
    pub fn materialize(&self, uri: &str) -> Result<MaterializedFile> {
        let uri = ContentUri::parse(uri)?;

        match self.copy_named(&uri) {
            Ok(file) => return Ok(file),
            Err(e) => warn!(error = %e, "named copy failed, falling back to fixed name"),
        }

        self.copy_fallback(&uri).map_err(|e| {
            warn!(error = %e, "fallback copy failed");
            WebIntentError::InvalidReference(format!("{uri}: {e}"))
        })
    }

    fn copy_named(&self, uri: &ContentUri) -> Result<MaterializedFile> {
        let display_name = self.display_name(uri)?;
        let file_name = sanitize_file_name(&display_name);
        let mut input = self.resolver.open_input(uri)?;
        let destination = self.destination(&file_name)?;

        let mut buffer = vec![0u8; self.config.copy_buffer_size.max(1)];
        let bytes_copied = write_or_discard(&destination, |output| {
            copy_buffered(&mut input, output, &mut buffer)
        })?;

        info!(
            path = %destination.display(),
            bytes = bytes_copied,
            "content materialized"
        );
        Ok(MaterializedFile {
            path: destination,
            strategy: CopyStrategy::Named,
            bytes_copied,
        })
    }

    fn copy_fallback(&self, uri: &ContentUri) -> Result<MaterializedFile> {
        let mut input = self.resolver.open_input(uri)?;
        let destination = self.destination(&self.config.fallback_file_name)?;

        let bytes_copied =
            write_or_discard(&destination, |output| copy_bytewise(&mut input, output))?;

        info!(
            path = %destination.display(),
            bytes = bytes_copied,
            "content materialized under fallback name"
        );
        Ok(MaterializedFile {
            path: destination,
            strategy: CopyStrategy::Fallback,
            bytes_copied,
        })
    }

    /// The display name from the single metadata row describing `uri`.
    fn display_name(&self, uri: &ContentUri) -> Result<String> {
        let column = &self.config.display_name_column;
        let rows = self.resolver.query(uri)?;
        let [row] = rows.as_slice() else {
            return Err(WebIntentError::MetadataQuery(format!(
                "expected exactly one row for {uri}, got {}",
                rows.len()
            )));
        };

        match row.get(column) {
            Some(Some(name)) => Ok(name.to_owned()),
            Some(None) => Err(WebIntentError::MetadataQuery(format!("{column} is NULL"))),
            None => Err(WebIntentError::MissingColumn(column.clone())),
        }
    }

    fn destination(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.target_dir)?;
        Ok(self.target_dir.join(file_name))
    }
}

/// Strip every character outside `[A-Za-z0-9.]`.
///
/// Names left empty or made only of dots would not name a file inside the
/// target directory; they are replaced with `openin-` plus 16 hex digits
/// of the SHA-256 of the original name.
pub fn sanitize_file_name(display_name: &str) -> String {
    let kept: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();

    if kept.chars().all(|c| c == '.') {
        let digest = hex::encode(Sha256::digest(display_name.as_bytes()));
        debug!(display_name, "display name sanitized to nothing usable");
        return format!("openin-{}", &digest[..16]);
    }
    kept
}

/// Create (or truncate) `path` and run `copy` into it. A failed copy
/// removes the partial file.
fn write_or_discard(
    path: &Path,
    copy: impl FnOnce(&mut File) -> io::Result<u64>,
) -> Result<u64> {
    let mut output = File::create(path)?;
    let result = copy(&mut output);
    drop(output);

    result.map_err(|e| {
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove_err, "could not remove partial file");
        }
        WebIntentError::Io(e)
    })
}

fn copy_buffered(input: &mut dyn Read, output: &mut dyn Write, buffer: &mut [u8]) -> io::Result<u64> {
    let mut total = 0u64;
    loop {
        let read = match input.read(buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&buffer[..read])?;
        total += read as u64;
    }
}

fn copy_bytewise(input: &mut dyn Read, output: &mut dyn Write) -> io::Result<u64> {
    copy_buffered(input, output, &mut [0u8; 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryEntry, MemoryProvider};
    use crate::traits::{columns, MetadataRow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn files_in(dir: &Path) -> Vec<String> {
        match fs::read_dir(dir) {
            Ok(entries) => {
                let mut names: Vec<_> = entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn named_copy_sanitizes_display_name() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = MemoryProvider::new().with_entry(
            "content://docs/42",
            MemoryEntry::new(b"%PDF-1.7 report".to_vec()).with_display_name("report 2024!.pdf"),
        );
        let config = BridgeConfig::default();

        let file = Materializer::new(&provider, tmp.path(), &config)
            .materialize("content://docs/42")
            .unwrap();

        assert_eq!(file.path, tmp.path().join("openIn").join("report2024.pdf"));
        assert_eq!(file.strategy, CopyStrategy::Named);
        assert_eq!(file.bytes_copied, 15);
        assert_eq!(fs::read(&file.path).unwrap(), b"%PDF-1.7 report");
    }

    #[test]
    fn failed_metadata_query_uses_fallback_name() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = MemoryProvider::new().with_entry(
            "content://docs/7",
            MemoryEntry::new(b"fallback bytes".to_vec()).without_metadata(),
        );
        let config = BridgeConfig::default();

        let file = Materializer::new(&provider, tmp.path(), &config)
            .materialize("content://docs/7")
            .unwrap();

        assert_eq!(file.path, tmp.path().join("openIn").join("OpenInFile"));
        assert_eq!(file.strategy, CopyStrategy::Fallback);
        assert_eq!(fs::read(&file.path).unwrap(), b"fallback bytes");
        assert_eq!(files_in(&tmp.path().join("openIn")), ["OpenInFile"]);
    }

    #[test]
    fn missing_display_name_uses_fallback_name() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = MemoryProvider::new()
            .with_entry("content://docs/8", MemoryEntry::new(b"anon".to_vec()));
        let config = BridgeConfig::default();

        let file = Materializer::new(&provider, tmp.path(), &config)
            .materialize("content://docs/8")
            .unwrap();
        assert_eq!(file.strategy, CopyStrategy::Fallback);
    }

    #[test]
    fn unopenable_reference_fails_without_leaving_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = MemoryProvider::new().with_entry(
            "content://docs/locked",
            MemoryEntry::unreadable().with_display_name("locked.pdf"),
        );
        let config = BridgeConfig::default();
        let materializer = Materializer::new(&provider, tmp.path(), &config);

        assert!(matches!(
            materializer.materialize("content://docs/locked"),
            Err(WebIntentError::InvalidReference(_))
        ));
        assert!(matches!(
            materializer.materialize("content://docs/unknown"),
            Err(WebIntentError::InvalidReference(_))
        ));
        assert!(files_in(materializer.target_dir()).is_empty());
    }

    #[test]
    fn blank_uri_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = MemoryProvider::new();
        let config = BridgeConfig::default();
        assert!(matches!(
            Materializer::new(&provider, tmp.path(), &config).materialize(""),
            Err(WebIntentError::InvalidReference(_))
        ));
    }

    #[test]
    fn existing_file_is_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("openIn");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("a.txt"), b"old content that is longer").unwrap();

        let provider = MemoryProvider::new().with_entry(
            "content://docs/a",
            MemoryEntry::new(b"new".to_vec()).with_display_name("a.txt"),
        );
        let config = BridgeConfig::default();
        Materializer::new(&provider, tmp.path(), &config)
            .materialize("content://docs/a")
            .unwrap();

        assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"new");
    }

    #[test]
    fn small_buffer_copies_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let provider = MemoryProvider::new().with_entry(
            "content://docs/big",
            MemoryEntry::new(payload.clone()).with_display_name("big.bin"),
        );
        let config = BridgeConfig {
            copy_buffer_size: 7,
            ..BridgeConfig::default()
        };

        let file = Materializer::new(&provider, tmp.path(), &config)
            .materialize("content://docs/big")
            .unwrap();
        assert_eq!(file.bytes_copied, 1000);
        assert_eq!(fs::read(&file.path).unwrap(), payload);
    }

    #[test]
    fn sanitize_keeps_only_allow_listed_characters() {
        assert_eq!(sanitize_file_name("report 2024!.pdf"), "report2024.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_file_name("Grüße.txt"), "Gre.txt");
    }

    #[test]
    fn unusable_names_get_a_stable_hashed_name() {
        let empty = sanitize_file_name("日本語");
        assert!(empty.starts_with("openin-"));
        assert_eq!(empty.len(), "openin-".len() + 16);
        assert_eq!(empty, sanitize_file_name("日本語"));
        assert_ne!(empty, sanitize_file_name("中文"));

        assert!(sanitize_file_name("..").starts_with("openin-"));
        assert!(sanitize_file_name(".").starts_with("openin-"));
        assert!(sanitize_file_name("").starts_with("openin-"));
    }

    /// Reader that yields a few bytes and then fails.
    struct Truncated(usize);

    impl Read for Truncated {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::Error::new(ErrorKind::ConnectionReset, "provider died"));
            }
            buf[0] = b'x';
            self.0 -= 1;
            Ok(1)
        }
    }

    /// Resolver whose first `failing_opens` streams break mid-copy.
    struct Flaky {
        opens: AtomicUsize,
        failing_opens: usize,
    }

    impl ContentResolver for Flaky {
        fn query(&self, _uri: &ContentUri) -> Result<Vec<MetadataRow>> {
            Ok(vec![
                MetadataRow::new().with_column(columns::DISPLAY_NAME, Some("flaky.dat".into())),
            ])
        }

        fn open_input(&self, _uri: &ContentUri) -> Result<Box<dyn Read + Send>> {
            let n = self.opens.fetch_add(1, Ordering::SeqCst);
            if n < self.failing_opens {
                Ok(Box::new(Truncated(3)))
            } else {
                Ok(Box::new(io::Cursor::new(b"complete".to_vec())))
            }
        }

        fn mime_type(&self, _uri: &ContentUri) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn broken_primary_copy_is_discarded_before_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = Flaky {
            opens: AtomicUsize::new(0),
            failing_opens: 1,
        };
        let config = BridgeConfig::default();
        let materializer = Materializer::new(&resolver, tmp.path(), &config);

        let file = materializer.materialize("content://flaky/1").unwrap();
        assert_eq!(file.strategy, CopyStrategy::Fallback);
        assert_eq!(fs::read(&file.path).unwrap(), b"complete");
        assert_eq!(files_in(materializer.target_dir()), ["OpenInFile"]);
    }

    #[test]
    fn both_copies_breaking_leaves_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = Flaky {
            opens: AtomicUsize::new(0),
            failing_opens: 2,
        };
        let config = BridgeConfig::default();
        let materializer = Materializer::new(&resolver, tmp.path(), &config);

        assert!(matches!(
            materializer.materialize("content://flaky/2"),
            Err(WebIntentError::InvalidReference(_))
        ));
        assert!(files_in(materializer.target_dir()).is_empty());
    }

    #[test]
    fn multiple_metadata_rows_use_fallback() {
        struct TwoRows;

        impl ContentResolver for TwoRows {
            fn query(&self, _uri: &ContentUri) -> Result<Vec<MetadataRow>> {
                let row = MetadataRow::new().with_column(columns::DISPLAY_NAME, Some("a".into()));
                Ok(vec![row.clone(), row])
            }

            fn open_input(&self, _uri: &ContentUri) -> Result<Box<dyn Read + Send>> {
                Ok(Box::new(io::Cursor::new(b"ab".to_vec())))
            }

            fn mime_type(&self, _uri: &ContentUri) -> Result<Option<String>> {
                Ok(None)
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let config = BridgeConfig::default();
        let file = Materializer::new(&TwoRows, tmp.path(), &config)
            .materialize("content://two")
            .unwrap();
        assert_eq!(file.strategy, CopyStrategy::Fallback);
    }
}
