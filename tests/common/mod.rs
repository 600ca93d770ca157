//! Shared test utilities and mock collaborators.

#![allow(dead_code, unused_imports)]

use fluxstore::{Action, ActionBus, ActionHandler, DispatchToken, Store};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Bus that hands out a fixed token and lets tests deliver actions by hand.
pub struct ManualBus {
    token: DispatchToken,
    handlers: Mutex<Vec<ActionHandler>>,
}

impl ManualBus {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: DispatchToken::from(token),
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn deliver(&self, action: Action) {
        let handlers = self.handlers.lock().clone();
        for handler in handlers {
            handler(&action);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl ActionBus for ManualBus {
    fn register(&self, handler: ActionHandler) -> DispatchToken {
        self.handlers.lock().push(handler);
        self.token.clone()
    }
}

/// Counts "change" events raised by a store.
pub fn count_changes(store: &Store) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = hits.clone();
    store.on(fluxstore::CHANGE_EVENT, move || {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    hits
}

/// Arguments a reducer was called with.
#[derive(Debug, Clone)]
pub struct ReducerCall {
    pub state: Value,
    pub action: Action,
}

pub type CallLog = Arc<Mutex<Vec<ReducerCall>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}
