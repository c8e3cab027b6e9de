// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! webintent — message translation, content materialization, and native
//! platform bridges.
//!
//! The [`translate`] and [`materialize`] modules hold the platform-neutral
//! logic. They talk to the OS only through the traits in [`traits`], which
//! are implemented over JNI on Android and over the local filesystem
//! everywhere else.

mod degrade;
pub mod materialize;
pub mod memory;
pub mod mime;
pub mod traits;
pub mod translate;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use materialize::{sanitize_file_name, Materializer};
pub use memory::{MemoryEntry, MemoryProvider};
pub use translate::{normalize, Translator};

/// The bridge for the OS this crate was compiled for: JNI on Android, the
/// filesystem stub everywhere else.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        Box::new(stub::StubBridge::new())
    }
}
