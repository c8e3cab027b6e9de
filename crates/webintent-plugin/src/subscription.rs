// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-slot registration for incoming-message subscribers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::result::ResultSink;

/// Holds at most one subscriber. Registering replaces the previous one.
#[derive(Default)]
pub struct SubscriptionSlot {
    sink: Mutex<Option<Arc<dyn ResultSink>>>,
}

impl SubscriptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    // The slot is a plain option, so a poisoned guard is still consistent.
    fn slot(&self) -> MutexGuard<'_, Option<Arc<dyn ResultSink>>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install `sink`, returning the subscriber it displaced.
    pub fn register(&self, sink: Arc<dyn ResultSink>) -> Option<Arc<dyn ResultSink>> {
        let previous = self.slot().replace(sink);
        if previous.is_some() {
            tracing::debug!("replacing existing incoming-message subscriber");
        }
        previous
    }

    pub fn current(&self) -> Option<Arc<dyn ResultSink>> {
        self.slot().clone()
    }

    pub fn clear(&self) -> Option<Arc<dyn ResultSink>> {
        self.slot().take()
    }

    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }
}

impl std::fmt::Debug for SubscriptionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionSlot")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::PluginResult;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn last_registration_wins() {
        let slot = SubscriptionSlot::new();
        let (first_tx, mut first_rx) = unbounded_channel::<PluginResult>();
        let (second_tx, mut second_rx) = unbounded_channel::<PluginResult>();

        assert!(slot.register(Arc::new(first_tx)).is_none());
        assert!(slot.register(Arc::new(second_tx)).is_some());

        slot.current().unwrap().deliver(PluginResult::ok("hello"));
        assert!(first_rx.try_recv().is_err());
        assert_eq!(second_rx.try_recv().unwrap().payload, "hello");
    }

    #[test]
    fn clear_empties_the_slot() {
        let slot = SubscriptionSlot::new();
        let (tx, _rx) = unbounded_channel::<PluginResult>();
        slot.register(Arc::new(tx));
        assert!(slot.is_active());
        assert!(slot.clear().is_some());
        assert!(!slot.is_active());
        assert!(slot.current().is_none());
    }
}
