//! Unidirectional state container.
//!
//! # Data flow
//!
//! ```text
//! ActionBus ──→ Store::on_action ──→ Reducer ──→ state ──→ "change"
//!     ↑                                                        │
//!     └──────────────────── observers dispatch ────────────────┘
//! ```
//!
//! - **State**: a JSON value owned by the store, copied on every read
//! - **Action**: a JSON object naming the reducer to run
//! - **Reducer**: `(store, state copy, action) -> Option<new state>`

mod action;
mod container;
mod error;
mod factory;
mod reducer;

pub use action::{Action, ACTION_NAME_FIELD, LEGACY_NAME_FIELD};
pub use container::{Store, WeakStore, DEFAULT_STORE_NAME};
pub use error::StoreError;
pub use factory::{StoreFactory, StoreSpec};
pub use reducer::{is_truthy, Method, Reducer};
