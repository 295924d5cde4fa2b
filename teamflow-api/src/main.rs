//! # TeamFlow API Server
//!
//! REST backend for team project and task tracking: users, projects with
//! embedded member lists, and tasks, with JWT authentication and
//! membership-based access control.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p teamflow-api
//! ```

use std::sync::Arc;

use teamflow_api::app::{build_router, AppState};
use teamflow_api::config::{Config, StorageBackend};
use teamflow_shared::store::{MemStore, PgStore, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TeamFlow API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match config.storage.backend {
        StorageBackend::Postgres => {
            let url = config.storage.database_url.clone().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required when STORAGE_BACKEND is 'postgres'")
            })?;
            let store = PgStore::connect(&url, config.storage.max_connections).await?;

            tracing::info!("Running database migrations");
            sqlx::migrate!("../migrations").run(store.pool()).await?;

            tracing::info!("Connected to PostgreSQL");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on shutdown");
            Arc::new(MemStore::new())
        }
    };

    let addr = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
