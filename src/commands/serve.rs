//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database, FileStorage, Notifier};

pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Arc::new(Database::connect(&config).await?);

    let cache = Arc::new(
        Cache::connect(&config)
            .await
            .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?,
    );

    let storage = Arc::new(FileStorage::init(&config).await?);
    let notifier = Arc::new(Notifier::new());

    let app_state = AppState::from_config(db, cache, storage, notifier, config);
    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
