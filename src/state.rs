//! Shared application context handed to every handler.

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::store::{MemoryStore, PgStore, Store};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open the configured store: PostgreSQL when `DATABASE_URL` is set, otherwise an
    /// empty in-memory store.
    pub async fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url, config.max_connections).await?;
                tracing::info!(max_connections = config.max_connections, "connected to postgres");
                Ok(Self::new(store))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
                Ok(Self::new(MemoryStore::new()))
            }
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
        tracing::info!("store closed");
    }
}
