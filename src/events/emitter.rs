use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::{Listener, ListenerId, Notifier};

/// In-process event emitter.
///
/// Listeners for an event run in bind order. The listener list is copied out
/// before calling, so a listener may bind, unbind or read the store freely.
#[derive(Default)]
pub struct EventEmitter {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<String, Vec<(ListenerId, Listener)>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently bound to `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }
}

impl Notifier for EventEmitter {
    fn bind(&self, event: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    fn unbind(&self, event: &str, id: ListenerId) {
        let mut listeners = self.listeners.write();
        if let Some(bound) = listeners.get_mut(event) {
            bound.retain(|(existing, _)| *existing != id);
            if bound.is_empty() {
                listeners.remove(event);
            }
        }
    }

    fn trigger(&self, event: &str) {
        let bound: Vec<Listener> = match self.listeners.read().get(event) {
            Some(bound) => bound.iter().map(|(_, listener)| listener.clone()).collect(),
            None => return,
        };

        tracing::trace!(event = %event, listeners = bound.len(), "Triggering event");
        for listener in bound {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Listener) {
        let hits = Arc::new(AtomicUsize::new(0));
        let sink = hits.clone();
        (
            hits,
            Arc::new(move || {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_trigger_reaches_bound_listeners_only() {
        let emitter = EventEmitter::new();
        let (change_hits, on_change) = counter();
        let (other_hits, on_other) = counter();
        emitter.bind("change", on_change);
        emitter.bind("other", on_other);

        emitter.trigger("change");

        assert_eq!(change_hits.load(Ordering::SeqCst), 1);
        assert_eq!(other_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unbind_stops_delivery() {
        let emitter = EventEmitter::new();
        let (hits, listener) = counter();
        let id = emitter.bind("change", listener);

        emitter.unbind("change", id);
        emitter.trigger("change");

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.listener_count("change"), 0);
    }

    #[test]
    fn test_trigger_without_listeners_is_noop() {
        let emitter = EventEmitter::new();
        emitter.trigger("change");
        assert_eq!(emitter.listener_count("change"), 0);
    }
}
