//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filo_core::config::AppConfig;
use filo_database::store::FileRecordStore;
use filo_service::registry::{FileRegistry, RegistryMetrics};

/// Application state passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The file registry
    pub registry: Arc<FileRegistry>,
}

impl AppState {
    /// Wire a registry over `store` with fresh counters.
    pub fn new(config: AppConfig, store: Arc<dyn FileRecordStore>) -> Self {
        let metrics = Arc::new(RegistryMetrics::new());
        let registry = FileRegistry::new(store, config.registry.clone(), metrics);
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// The counters shared by the registry and the HTTP layer.
    pub fn metrics(&self) -> &Arc<RegistryMetrics> {
        self.registry.metrics()
    }
}
