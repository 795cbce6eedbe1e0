//! # Backend State
//!
//! Wraps the [`Backend`] aggregate for command access.

use std::sync::Arc;

use mobicare_backend::{Backend, RealtimeStore};

/// Holds the hosted store and its repositories.
///
/// Repositories are Arc-backed, so cloning this state is cheap and
/// commands can hold it across awaits.
#[derive(Clone)]
pub struct BackendState {
    backend: Backend,
}

impl BackendState {
    /// Wires the backend over the given store.
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        BackendState {
            backend: Backend::new(store),
        }
    }

    /// Access to the repositories.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}
