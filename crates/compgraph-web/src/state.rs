//! Application state.

use std::sync::Arc;

use compgraph_graph::GraphStore;

/// Application state shared across handlers.
///
/// Holds the only shared resource, the graph store handle. Handlers keep no
/// other state between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }
}
