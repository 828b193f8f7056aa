//! Shared handler state.

use melies_core::ServerSettings;
use melies_pipeline::RepairLoop;
use std::sync::Arc;

/// State cloned into every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    repair_loop: Arc<RepairLoop>,
    settings: Arc<ServerSettings>,
}

impl AppState {
    /// Creates new handler state.
    pub fn new(repair_loop: Arc<RepairLoop>, settings: ServerSettings) -> Self {
        Self {
            repair_loop,
            settings: Arc::new(settings),
        }
    }

    /// The repair loop serving generate requests.
    pub fn repair_loop(&self) -> &RepairLoop {
        &self.repair_loop
    }

    /// Server settings.
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }
}
