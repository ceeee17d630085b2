//! Server binary: reads config, prepares storage, serves the API.

use std::sync::Arc;
use student_registry::{
    app, ensure_database_exists, ensure_tables, AppState, MemoryStore, PgStore, ServiceConfig, StorageKind,
    Store,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_registry=info,tower_http=info")),
        )
        .init();

    let store: Arc<dyn Store> = match config.storage {
        StorageKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let store = PgStore::connect(&config.database_url, config.max_connections).await?;
            ensure_tables(store.pool()).await?;
            Arc::new(store)
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let app = app(AppState::new(store));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
