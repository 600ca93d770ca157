//! Store construction bound to one action bus.

use std::sync::Arc;

use serde_json::Value;

use super::action::Action;
use super::container::Store;
use super::reducer::{Method, Reducer};
use crate::config::StoreConfig;
use crate::dispatcher::ActionBus;
use crate::events::EventEmitter;

/// Reducers and methods to install on a new store in one go.
#[derive(Default, Clone)]
pub struct StoreSpec {
    reducers: Vec<(String, Reducer)>,
    methods: Vec<(String, Method)>,
}

impl StoreSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reducer<F>(mut self, action_id: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&Store, Value, &Action) -> Option<Value> + Send + Sync + 'static,
    {
        self.reducers.push((action_id.into(), Arc::new(reducer)));
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Store, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.push((name.into(), Arc::new(method)));
        self
    }
}

/// Creates stores that all register with the same bus.
///
/// The bus is passed in explicitly; several factories (or stores) may share
/// one bus or each use their own.
#[derive(Clone)]
pub struct StoreFactory {
    bus: Arc<dyn ActionBus>,
}

impl StoreFactory {
    pub fn new(bus: Arc<dyn ActionBus>) -> Self {
        Self { bus }
    }

    pub fn create(&self, initial_state: Option<Value>) -> Store {
        Store::new(self.bus.as_ref(), initial_state)
    }

    /// Create a store with every reducer and method of `spec` installed.
    ///
    /// Same result as [`create`](Self::create) followed by
    /// `register_reducer`/`register_method` for each entry.
    pub fn create_with_spec(&self, initial_state: Option<Value>, spec: StoreSpec) -> Store {
        let store = self.create(initial_state);
        install(&store, spec);
        store
    }

    /// Create a named store from configuration.
    pub fn create_from_config(&self, config: &StoreConfig) -> Store {
        Store::build(
            &config.name,
            self.bus.as_ref(),
            Arc::new(EventEmitter::new()),
            Some(config.initial_state.clone()),
        )
    }
}

fn install(store: &Store, spec: StoreSpec) {
    for (action_id, reducer) in spec.reducers {
        store.insert_reducer(action_id, reducer);
    }
    for (name, method) in spec.methods {
        store.insert_method(name, method);
    }
}
