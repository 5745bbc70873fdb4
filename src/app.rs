// src/app.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;
use crate::provider::{InfoTrackClient, ProviderError, TitleProvider};
use crate::service::PropertyService;

/// Everything a request handler needs. Shared by all server workers.
pub struct App {
    pub config: AppConfig,
    pub db: Database,
    pub service: Arc<PropertyService>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ProviderError> {
        let provider = InfoTrackClient::new(&config.provider)?;
        let db = Database::new(config.db_path.clone());
        Ok(Self::with_provider(config, db, Arc::new(provider)))
    }

    pub fn with_provider(config: AppConfig, db: Database, provider: Arc<dyn TitleProvider>) -> Self {
        let service = Arc::new(PropertyService::new(config.mode, provider));
        Self {
            config,
            db,
            service,
        }
    }
}
