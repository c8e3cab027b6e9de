// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-field fault boundary for values read across the native boundary.
//
// A field that cannot be read is logged and left out; it never fails the
// message it belongs to.

#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::fmt::Display;

use tracing::warn;

use webintent_core::{ExtraValue, Extras};

/// Keep a successfully read field, or log the failure and drop it.
pub(crate) fn degrade<T, E: Display>(field: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(field, error = %e, "field unreadable, omitted");
            None
        }
    }
}

/// Read every key of a key-value container. Entries whose value cannot be
/// read are omitted.
pub(crate) fn collect_extras<E: Display>(
    keys: impl IntoIterator<Item = String>,
    mut read: impl FnMut(&str) -> Result<ExtraValue, E>,
) -> Extras {
    keys.into_iter()
        .filter_map(|key| {
            let value = degrade(&key, read(&key))?;
            Some((key, value))
        })
        .collect()
}

/// Read `len` array elements. An unreadable element becomes
/// [`ExtraValue::Null`] so later elements keep their positions.
pub(crate) fn collect_array<E: Display>(
    len: usize,
    mut read: impl FnMut(usize) -> Result<ExtraValue, E>,
) -> Vec<ExtraValue> {
    (0..len)
        .map(|index| {
            let field = format!("[{index}]");
            degrade(&field, read(index)).unwrap_or(ExtraValue::Null)
        })
        .collect()
}
