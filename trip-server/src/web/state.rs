//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::Orchestrator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The planning pipeline
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
