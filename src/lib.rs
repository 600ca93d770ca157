//! Flux-style state store.
//!
//! A [`Store`] holds one JSON state value, changes it only when a reducer
//! registered for a dispatched [`Action`] returns a new value, and raises a
//! `"change"` event afterwards.
//!
//! ```
//! use std::sync::Arc;
//! use fluxstore::{Action, Dispatcher, StoreFactory, StoreSpec};
//! use serde_json::json;
//!
//! let dispatcher = Arc::new(Dispatcher::new());
//! let stores = StoreFactory::new(dispatcher.clone());
//!
//! let counter = stores.create_with_spec(
//!     Some(json!({ "count": 0 })),
//!     StoreSpec::new()
//!         .reducer("INCREMENT", |_store, mut state, _action| {
//!             let count = state["count"].as_i64().unwrap_or(0);
//!             state["count"] = json!(count + 1);
//!             Some(state)
//!         })
//!         .method("count", |store, _args| store.get_state()["count"].clone()),
//! );
//!
//! dispatcher.dispatch(Action::named("INCREMENT")).unwrap();
//! assert_eq!(counter.call("count", &[]).unwrap(), json!(1));
//! ```

pub mod config;
pub mod dispatcher;
pub mod events;
pub mod logging;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use dispatcher::{ActionBus, ActionHandler, DispatchError, DispatchToken, Dispatcher};
pub use events::{EventEmitter, Listener, ListenerId, Notifier, CHANGE_EVENT};
pub use store::{
    is_truthy, Action, Method, Reducer, Store, StoreError, StoreFactory, StoreSpec,
    WeakStore,
};
