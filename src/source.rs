//! Host event source boundary.
//!
//! The host's emission engine is external; the emitter only needs a way
//! to register one callback per event kind. `LocalEventSource` is an
//! in-process implementation for embedding and tests.

use std::collections::HashMap;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::events::EventKind;

/// Callback registered against one host event kind.
///
/// The returned future is awaited by the host before it considers the
/// event delivered; its output is never consumed.
pub type EventCallback = Box<dyn Fn(Value) -> BoxFuture<'static, ()> + Send + Sync>;

/// Interface the host's event emitter exposes for subscription.
pub trait EventSource {
    /// Register a callback for one host event kind.
    fn on(&mut self, kind: EventKind, callback: EventCallback);
}

/// In-process event source.
///
/// Invokes registered callbacks directly, awaiting each in registration
/// order, which mirrors the host's own emission ordering.
#[derive(Default)]
pub struct LocalEventSource {
    handlers: HashMap<EventKind, Vec<EventCallback>>,
}

impl LocalEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Fire an event, awaiting each registered callback.
    pub async fn fire(&self, kind: EventKind, payload: Value) {
        if let Some(callbacks) = self.handlers.get(&kind) {
            for callback in callbacks {
                callback(payload.clone()).await;
            }
        }
    }
}

impl EventSource for LocalEventSource {
    fn on(&mut self, kind: EventKind, callback: EventCallback) {
        self.handlers.entry(kind).or_default().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fire_invokes_only_matching_callbacks() {
        let mut source = LocalEventSource::new();
        let stats_calls = Arc::new(AtomicUsize::new(0));
        let done_calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&stats_calls);
        source.on(
            EventKind::Stats,
            Box::new(move |_| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        let counter = Arc::clone(&done_calls);
        source.on(
            EventKind::Done,
            Box::new(move |_| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );

        source.fire(EventKind::Stats, json!({})).await;
        source.fire(EventKind::Stats, json!({})).await;
        source.fire(EventKind::PhaseStarted, json!({})).await;

        assert_eq!(stats_calls.load(Ordering::SeqCst), 2);
        assert_eq!(done_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.handler_count(EventKind::Stats), 1);
        assert_eq!(source.handler_count(EventKind::PhaseStarted), 0);
    }
}
