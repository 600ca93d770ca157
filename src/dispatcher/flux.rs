//! Flux-style dispatcher.
//!
//! Every dispatched action reaches every registered handler exactly once, in
//! registration order. A handler may call [`Dispatcher::wait_for`] to force
//! other handlers to run first.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::{ActionBus, ActionHandler, DispatchError, DispatchToken};
use crate::store::Action;

const TOKEN_PREFIX: &str = "ID_";

/// Synchronous action bus with Flux `waitFor` semantics.
pub struct Dispatcher {
    last_id: AtomicU64,
    /// Registration order is dispatch order.
    handlers: RwLock<Vec<(DispatchToken, ActionHandler)>>,
    cycle: Mutex<DispatchCycle>,
}

/// Bookkeeping for the dispatch in progress.
#[derive(Default)]
struct DispatchCycle {
    dispatching: bool,
    action: Option<Arc<Action>>,
    pending: HashSet<DispatchToken>,
    handled: HashSet<DispatchToken>,
}

/// Clears the dispatching flag when `dispatch` returns or unwinds.
struct CycleGuard<'a> {
    cycle: &'a Mutex<DispatchCycle>,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let mut cycle = self.cycle.lock();
        cycle.dispatching = false;
        cycle.action = None;
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            last_id: AtomicU64::new(1),
            handlers: RwLock::new(Vec::new()),
            cycle: Mutex::new(DispatchCycle::default()),
        }
    }

    /// Remove a handler. It will not see any later action.
    pub fn unregister(&self, token: &DispatchToken) -> Result<(), DispatchError> {
        let mut handlers = self.handlers.write();
        let Some(index) = handlers.iter().position(|(t, _)| t == token) else {
            return Err(DispatchError::UnknownToken {
                token: token.clone(),
            });
        };
        handlers.remove(index);
        tracing::debug!(token = %token, "Handler unregistered");
        Ok(())
    }

    /// Deliver an action to every registered handler.
    ///
    /// # Errors
    /// Returns [`DispatchError::NestedDispatch`] if called from inside a
    /// handler (or concurrently with another dispatch). No handler runs in
    /// that case.
    pub fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        {
            let mut cycle = self.cycle.lock();
            if cycle.dispatching {
                return Err(DispatchError::NestedDispatch);
            }
            cycle.dispatching = true;
            cycle.action = Some(Arc::new(action));
            cycle.pending.clear();
            cycle.handled.clear();
        }
        let _guard = CycleGuard { cycle: &self.cycle };

        let tokens: Vec<DispatchToken> = self
            .handlers
            .read()
            .iter()
            .map(|(token, _)| token.clone())
            .collect();

        tracing::debug!(handlers = tokens.len(), "Dispatching action");

        for token in &tokens {
            if self.cycle.lock().pending.contains(token) {
                continue;
            }
            self.invoke(token);
        }

        Ok(())
    }

    /// Run the handlers behind `tokens` before continuing the current one.
    ///
    /// Handlers that already ran during this dispatch are skipped.
    ///
    /// # Errors
    /// - [`DispatchError::NotDispatching`] outside of a dispatch.
    /// - [`DispatchError::CircularDependency`] if a token's handler is
    ///   currently running further up the stack.
    /// - [`DispatchError::UnknownToken`] for an unregistered token.
    pub fn wait_for(&self, tokens: &[DispatchToken]) -> Result<(), DispatchError> {
        if !self.is_dispatching() {
            return Err(DispatchError::NotDispatching);
        }

        for token in tokens {
            {
                let cycle = self.cycle.lock();
                if cycle.pending.contains(token) {
                    if cycle.handled.contains(token) {
                        continue;
                    }
                    return Err(DispatchError::CircularDependency {
                        token: token.clone(),
                    });
                }
            }

            if self.handler(token).is_none() {
                return Err(DispatchError::UnknownToken {
                    token: token.clone(),
                });
            }
            self.invoke(token);
        }

        Ok(())
    }

    /// Whether a dispatch is in progress.
    pub fn is_dispatching(&self) -> bool {
        self.cycle.lock().dispatching
    }

    fn handler(&self, token: &DispatchToken) -> Option<ActionHandler> {
        self.handlers
            .read()
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, handler)| handler.clone())
    }

    /// Runs one handler with no lock held, so it may re-enter `wait_for`.
    fn invoke(&self, token: &DispatchToken) {
        // Unregistered during this dispatch.
        let Some(handler) = self.handler(token) else {
            return;
        };

        let action = {
            let mut cycle = self.cycle.lock();
            cycle.pending.insert(token.clone());
            cycle.action.clone()
        };

        if let Some(action) = action {
            tracing::trace!(token = %token, "Invoking handler");
            handler(&action);
        }

        self.cycle.lock().handled.insert(token.clone());
    }
}

impl ActionBus for Dispatcher {
    fn register(&self, handler: ActionHandler) -> DispatchToken {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst);
        let token = DispatchToken::new(format!("{TOKEN_PREFIX}{id}"));
        self.handlers.write().push((token.clone(), handler));
        tracing::debug!(token = %token, "Handler registered");
        token
    }
}
