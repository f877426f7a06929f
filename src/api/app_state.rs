use crate::observability::AppMetrics;
use crate::services::catalog_service::CatalogService;
use std::sync::Arc;

/// Application state containing the shared catalog service and metrics
#[derive(Clone)]
pub struct AppState {
    /// Catalog service serving filtered, sorted, grouped and tree views
    pub catalog_service: Arc<dyn CatalogService>,
    /// Metrics shared with the observability router
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog_service", &"Arc<dyn CatalogService>")
            .field("records", &self.catalog_service.total())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(catalog_service: Box<dyn CatalogService>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            catalog_service: Arc::from(catalog_service),
            metrics,
        }
    }
}
