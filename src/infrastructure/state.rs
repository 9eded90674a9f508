//! Application state shared across all handlers

use std::sync::Arc;

use crate::domain::{Catalog, Store};
use crate::infrastructure::config::Config;
use crate::modules::integrations::gemini::GeminiClient;
use crate::services::RecommendationService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The one session of this process
    pub store: Arc<Store>,
    /// Genres, moods and levels offered by the form
    pub catalog: Arc<Catalog>,
    /// Recommendation fetcher
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(catalog: Catalog, recommendations: RecommendationService) -> Self {
        Self {
            store: Arc::new(Store::new()),
            catalog: Arc::new(catalog),
            recommendations: Arc::new(recommendations),
        }
    }

    /// Wire everything from configuration, with the bundled option lists
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let catalog = Catalog::builtin()?;
        let client = GeminiClient::new(&config.gemini);
        Ok(Self::new(catalog, RecommendationService::new(client)))
    }
}
