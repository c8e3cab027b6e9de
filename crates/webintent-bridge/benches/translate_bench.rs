// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for message translation in the webintent-bridge
// crate: a share-style intent with nested extras and a handful of clip
// items whose URIs need a MIME lookup.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use webintent_bridge::{MemoryEntry, MemoryProvider, Translator};
use webintent_core::{ClipItem, ExtraValue, Extras, Message};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn share_message(clips: usize) -> Message {
    let mut nested = Extras::new();
    nested.insert("width".into(), ExtraValue::Int(1920));
    nested.insert("height".into(), ExtraValue::Int(1080));
    nested.insert(
        "tags".into(),
        ExtraValue::Array((0..32).map(|i| ExtraValue::String(format!("tag-{i}"))).collect()),
    );

    let mut message = Message::new()
        .with_action("android.intent.action.SEND_MULTIPLE")
        .with_mime_type("image/*")
        .with_category("android.intent.category.DEFAULT")
        .with_flags(0x0000_0001)
        .with_extra("android.intent.extra.SUBJECT", "holiday")
        .with_extra("android.intent.extra.TIMESTAMP", 1_700_000_000_000i64)
        .with_extra("meta", nested);

    for i in 0..clips {
        message = message.with_clip(ClipItem {
            uri: Some(format!("content://media/external/images/{i}")),
            ..Default::default()
        });
    }
    message
}

fn provider(clips: usize) -> MemoryProvider {
    (0..clips).fold(MemoryProvider::new(), |provider, i| {
        provider.with_entry(
            format!("content://media/external/images/{i}"),
            MemoryEntry::new(Vec::new()).with_mime_type("image/jpeg"),
        )
    })
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Translate a share intent carrying 8 clip items.
fn bench_translate(c: &mut Criterion) {
    let message = share_message(8);
    let provider = provider(8);
    let translator = Translator::new(&provider, true);

    c.bench_function("translate (8 clip items)", |b| {
        b.iter(|| black_box(translator.translate(black_box(&message))));
    });
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
