use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use crate::{catalog::Catalog, config::AppConfig, justify::Justifier, taxonomy::Taxonomy};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub taxonomy: Arc<Taxonomy>,
    pub catalog: Arc<Catalog>,
    pub justifier: Justifier,
    pub shutdown_sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Status {
    pub dishes: usize,
    pub wines: usize,
    pub generator: String,
    pub warnings: Vec<String>,
}

impl AppState {
    pub fn status(&self) -> Status {
        Status {
            dishes: self.catalog.dishes.len(),
            wines: self.catalog.wines.len(),
            generator: self.justifier.generator_name(),
            warnings: self.catalog.warnings.clone(),
        }
    }
}
