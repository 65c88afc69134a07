//! The client-side store.
//!
//! State lives in a `tokio::sync::watch` channel. Mutation happens only
//! through [`Store::dispatch`], which runs the pure [`reduce`] function and
//! wakes subscribers when the state actually changed.

mod reducer;
mod state;

pub use reducer::{reduce, Action};
pub use state::{AppState, CartState, CatalogState, ListState, LoadStatus};

use bazaar_commerce::CommerceError;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to the application state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    tx: Arc<watch::Sender<AppState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    /// Create a store with the given initial state.
    pub fn new(initial: AppState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply an action. Subscribers are notified only when it succeeds.
    pub fn dispatch(&self, action: Action) -> Result<(), CommerceError> {
        let name = action.name();
        let mut result = Ok(());
        self.tx.send_if_modified(|state| {
            result = reduce(state, action);
            result.is_ok()
        });
        match &result {
            Ok(()) => tracing::trace!(action = name, "dispatched"),
            Err(e) => tracing::debug!(action = name, error = %e, "action rejected"),
        }
        result
    }

    /// Dispatch an action the reducer cannot reject, such as loading
    /// progress or a server response.
    pub fn emit(&self, action: Action) {
        let _ = self.dispatch(action);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Receive every committed state.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }
}
