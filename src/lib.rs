pub mod calendar;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod store;
pub mod views;

use std::sync::Arc;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub store: store::EventStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;

        let store = store::EventStore::new(db.pool.clone());

        Ok(Arc::new(Self { db, store, config }))
    }
}
