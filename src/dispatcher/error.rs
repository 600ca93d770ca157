use thiserror::Error;

use super::DispatchToken;

/// Errors reported by [`Dispatcher`](super::Dispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// `dispatch` was called while another dispatch was still running.
    #[error("Cannot dispatch in the middle of a dispatch")]
    NestedDispatch,

    /// `wait_for` was called outside of a dispatch.
    #[error("wait_for must be invoked while dispatching")]
    NotDispatching,

    /// The token does not map to a registered handler.
    #[error("'{token}' does not map to a registered handler")]
    UnknownToken { token: DispatchToken },

    /// The handler is already running further up the call stack.
    #[error("Circular dependency detected while waiting for '{token}'")]
    CircularDependency { token: DispatchToken },
}
