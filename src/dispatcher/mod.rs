//! Action delivery.
//!
//! A [`Store`](crate::store::Store) never broadcasts actions itself. It
//! registers a handler with an [`ActionBus`] at construction and keeps the
//! returned [`DispatchToken`]. Any bus that honours the contract works; the
//! crate ships [`Dispatcher`], a Flux-style implementation with `wait_for`
//! ordering.

mod error;
mod flux;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::Action;

pub use error::DispatchError;
pub use flux::Dispatcher;

/// Callback invoked by a bus once per dispatched action.
pub type ActionHandler = Arc<dyn Fn(&Action) + Send + Sync>;

/// Registration side of an action bus.
///
/// Implementations must deliver actions to registered handlers one at a
/// time; a store assumes it is never asked to handle two actions at once.
pub trait ActionBus: Send + Sync {
    /// Register a handler and return the token identifying it.
    fn register(&self, handler: ActionHandler) -> DispatchToken;
}

impl<B: ActionBus + ?Sized> ActionBus for Arc<B> {
    fn register(&self, handler: ActionHandler) -> DispatchToken {
        (**self).register(handler)
    }
}

/// Opaque handle returned by [`ActionBus::register`].
///
/// Stores expose it through `get_token` so callers can express ordering
/// between stores (see [`Dispatcher::wait_for`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchToken(String);

impl DispatchToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DispatchToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for DispatchToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}
