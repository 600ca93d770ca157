use thiserror::Error;

/// Errors surfaced by [`Store`](super::Store).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No method is registered under this name.
    #[error("Method '{name}' is not registered on this store")]
    MethodNotFound { name: String },
}
