//! The state container.
//!
//! A [`Store`] owns one JSON state value. Callers only ever see copies of it:
//! `get_state` hands out a clone and `set_state` takes ownership of the
//! replacement. The only other way to change the state is to dispatch an
//! action through the bus the store registered with.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::action::Action;
use super::error::StoreError;
use super::reducer::{is_truthy, Method, Reducer};
use crate::dispatcher::{ActionBus, ActionHandler, DispatchToken};
use crate::events::{EventEmitter, Listener, ListenerId, Notifier, CHANGE_EVENT};

/// Name used in log fields when none is configured.
pub const DEFAULT_STORE_NAME: &str = "store";

/// Operations a registered method name would shadow.
const BUILTIN_OPERATIONS: &[&str] = &[
    "get_state",
    "set_state",
    "get_initial_state",
    "reset",
    "get_token",
    "register_reducer",
    "register_method",
    "on_action",
    "call",
    "on",
    "off",
    "trigger",
    "getState",
    "setState",
    "getInitialState",
    "getToken",
    "reducer",
    "method",
    "onAction",
];

/// Handle to a state container.
///
/// Cloning is cheap and every clone addresses the same container. The bus
/// only holds a weak reference, so dropping the last handle detaches the
/// store from further actions. Reducers, methods and listeners the store
/// owns must not capture a clone of it: that is a reference cycle and the
/// store is never freed. Capture a [`WeakStore`] instead.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

/// Non-owning handle obtained from [`Store::downgrade`].
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    /// The store, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

struct StoreInner {
    name: String,
    token: DispatchToken,
    /// Restore target for `reset`; never mutated after construction.
    initial_state: Value,
    state: RwLock<Value>,
    reducers: RwLock<HashMap<String, Reducer>>,
    methods: RwLock<HashMap<String, Method>>,
    notifier: Arc<dyn Notifier>,
}

impl Store {
    /// Create a store registered with `bus`.
    ///
    /// A missing or falsy initial state becomes an empty object.
    pub fn new(bus: &dyn ActionBus, initial_state: Option<Value>) -> Self {
        Self::with_notifier(bus, Arc::new(EventEmitter::new()), initial_state)
    }

    /// Create a store that raises its events through `notifier`.
    pub fn with_notifier(
        bus: &dyn ActionBus,
        notifier: Arc<dyn Notifier>,
        initial_state: Option<Value>,
    ) -> Self {
        Self::build(DEFAULT_STORE_NAME, bus, notifier, initial_state)
    }

    pub(crate) fn build(
        name: &str,
        bus: &dyn ActionBus,
        notifier: Arc<dyn Notifier>,
        initial_state: Option<Value>,
    ) -> Self {
        let initial_state = initial_state
            .filter(is_truthy)
            .unwrap_or_else(|| Value::Object(Map::new()));

        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner>| {
            let handler = action_handler(WeakStore {
                inner: weak.clone(),
            });
            let token = bus.register(handler);
            StoreInner {
                name: name.to_string(),
                token,
                state: RwLock::new(initial_state.clone()),
                initial_state,
                reducers: RwLock::new(HashMap::new()),
                methods: RwLock::new(HashMap::new()),
                notifier,
            }
        });

        tracing::debug!(
            store = %inner.name,
            token = %inner.token,
            "Store created"
        );

        Self { inner }
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// A copy of the current state.
    pub fn get_state(&self) -> Value {
        self.inner.state.read().clone()
    }

    /// Replace the current state. Raises no event.
    pub fn set_state(&self, state: Value) {
        *self.inner.state.write() = state;
    }

    /// The state the store was created with.
    pub fn get_initial_state(&self) -> &Value {
        &self.inner.initial_state
    }

    /// Restore the initial state. Raises no event; call
    /// [`trigger`](Self::trigger) if observers should hear about it.
    pub fn reset(&self) {
        self.set_state(self.inner.initial_state.clone());
        tracing::debug!(store = %self.inner.name, "Store reset to initial state");
    }

    /// Token returned by the bus when this store registered.
    pub fn get_token(&self) -> &DispatchToken {
        &self.inner.token
    }

    /// Route actions named `action_id` to `reducer`. Replaces any reducer
    /// already registered under that name.
    ///
    /// Reach the store through the `&Store` argument rather than capturing a
    /// handle in the closure.
    pub fn register_reducer<F>(&self, action_id: impl Into<String>, reducer: F)
    where
        F: Fn(&Store, Value, &Action) -> Option<Value> + Send + Sync + 'static,
    {
        self.insert_reducer(action_id.into(), Arc::new(reducer));
    }

    pub(crate) fn insert_reducer(&self, action_id: String, reducer: Reducer) {
        tracing::debug!(store = %self.inner.name, action = %action_id, "Reducer registered");
        self.inner.reducers.write().insert(action_id, reducer);
    }

    /// Attach a named method, later invoked with [`call`](Self::call).
    ///
    /// As with reducers, use the `&Store` argument instead of a captured
    /// handle.
    pub fn register_method<F>(&self, name: impl Into<String>, method: F)
    where
        F: Fn(&Store, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.insert_method(name.into(), Arc::new(method));
    }

    pub(crate) fn insert_method(&self, name: String, method: Method) {
        if BUILTIN_OPERATIONS.contains(&name.as_str()) {
            tracing::warn!(
                store = %self.inner.name,
                method = %name,
                "Method name shadows a built-in store operation"
            );
        }
        tracing::debug!(store = %self.inner.name, method = %name, "Method registered");
        self.inner.methods.write().insert(name, method);
    }

    /// Invoke a registered method with this store bound.
    ///
    /// # Errors
    /// Returns [`StoreError::MethodNotFound`] if nothing is registered under
    /// `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, StoreError> {
        let method = self
            .inner
            .methods
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::MethodNotFound {
                name: name.to_string(),
            })?;
        Ok(method(self, args))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.inner.methods.read().contains_key(name)
    }

    /// Handle one action delivered by the bus.
    ///
    /// Unknown actions and declining reducers are silent no-ops. An accepted
    /// result replaces the state and raises [`CHANGE_EVENT`].
    pub fn on_action(&self, action: &Action) {
        let Some(action_id) = action.name() else {
            tracing::trace!(store = %self.inner.name, "Ignoring unnamed action");
            return;
        };

        let reducer = self.inner.reducers.read().get(action_id).cloned();
        let Some(reducer) = reducer else {
            tracing::trace!(
                store = %self.inner.name,
                action = %action_id,
                "No reducer registered, ignoring action"
            );
            return;
        };

        match reducer(self, self.get_state(), action) {
            Some(next) if is_truthy(&next) => {
                self.set_state(next);
                tracing::debug!(store = %self.inner.name, action = %action_id, "State changed");
                self.trigger(CHANGE_EVENT);
            }
            _ => {
                tracing::trace!(
                    store = %self.inner.name,
                    action = %action_id,
                    "Reducer declined, state unchanged"
                );
            }
        }
    }

    /// Listen for `event` (normally [`CHANGE_EVENT`]).
    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.inner.notifier.bind(event, listener)
    }

    pub fn off(&self, event: &str, id: ListenerId) {
        self.inner.notifier.unbind(event, id);
    }

    pub fn trigger(&self, event: &str) {
        self.inner.notifier.trigger(event);
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("token", &self.inner.token)
            .field("state", &*self.inner.state.read())
            .finish_non_exhaustive()
    }
}

fn action_handler(store: WeakStore) -> ActionHandler {
    Arc::new(move |action: &Action| {
        if let Some(store) = store.upgrade() {
            store.on_action(action);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_falsy_initial_state_becomes_empty_object() {
        let dispatcher = Dispatcher::new();
        for initial in [None, Some(json!(null)), Some(json!(false)), Some(json!(""))] {
            let store = Store::new(&dispatcher, initial);
            assert_eq!(store.get_state(), json!({}));
            assert_eq!(store.get_initial_state(), &json!({}));
        }
    }

    #[test]
    fn test_call_unknown_method_fails() {
        let dispatcher = Dispatcher::new();
        let store = Store::new(&dispatcher, None);
        assert_eq!(
            store.call("getFoo", &[]),
            Err(StoreError::MethodNotFound {
                name: "getFoo".to_string()
            })
        );
    }

    #[test]
    fn test_dropped_store_ignores_actions() {
        let dispatcher = Dispatcher::new();
        let store = Store::new(&dispatcher, None);
        store.register_reducer("FOO", |_, _, _| Some(json!({ "foo": 1 })));
        drop(store);

        assert!(dispatcher.dispatch(Action::named("FOO")).is_ok());
    }

    #[test]
    fn test_dropping_last_handle_frees_reducers() {
        struct DropFlag(Arc<AtomicBool>);
        impl Drop for DropFlag {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dispatcher = Dispatcher::new();
        let freed = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(freed.clone());
        let store = Store::new(&dispatcher, None);
        store.register_reducer("FOO", move |store, _state, _action| {
            let _keep = &flag;
            Some(store.get_initial_state().clone())
        });
        store.register_method("snapshot", |store, _args| store.get_state());

        drop(store);

        assert!(freed.load(Ordering::SeqCst));
        assert!(dispatcher.dispatch(Action::named("FOO")).is_ok());
    }

    #[test]
    fn test_shadowing_method_does_not_replace_builtin() {
        let dispatcher = Dispatcher::new();
        let store = Store::new(&dispatcher, Some(json!({ "foo": "bar" })));
        store.register_method("getState", |_, _| json!("shadowed"));

        assert_eq!(store.call("getState", &[]).unwrap(), json!("shadowed"));
        assert_eq!(store.get_state(), json!({ "foo": "bar" }));
    }

    #[test]
    fn test_debug_shows_name_and_state() {
        let dispatcher = Dispatcher::new();
        let store = Store::new(&dispatcher, Some(json!({ "n": 1 })));
        let rendered = format!("{store:?}");
        assert!(rendered.contains("\"store\""));
        assert!(rendered.contains("ID_1"));
    }
}
