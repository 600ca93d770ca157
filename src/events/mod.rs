//! Change notification.
//!
//! Stores raise named events through a [`Notifier`]. The default notifier is
//! [`EventEmitter`]; hosts with their own observer machinery can plug it in
//! through [`Store::with_notifier`](crate::store::Store::with_notifier).

mod emitter;

use std::sync::Arc;

pub use emitter::EventEmitter;

/// Event raised after a reducer produced a new state.
pub const CHANGE_EVENT: &str = "change";

/// Observer callback. Events carry no payload; listeners read the store.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Identifies one binding so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Subscribe/trigger surface used by stores.
pub trait Notifier: Send + Sync {
    /// Bind `listener` to `event`.
    fn bind(&self, event: &str, listener: Listener) -> ListenerId;

    /// Remove a binding. Unknown ids are ignored.
    fn unbind(&self, event: &str, id: ListenerId);

    /// Call every listener bound to `event`.
    fn trigger(&self, event: &str);
}
