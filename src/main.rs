mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{repositories::JsonMetadataRepository, router::create_router, state::AppState};
use application::{
    error::PersistError, repositories::metadata_repository::MetadataRepository,
    services::metadata_store::MetadataStore,
};
use axum::http::HeaderValue;
use domain::config::{
    local::{ConfigError, LocalConfig},
    secrets::Secrets,
};
use services::StorageError;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Metadata error: {0}")]
    Metadata(#[from] PersistError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid CORS origin: {0}")]
    Cors(String),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("drop-service failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let local_config = LocalConfig::from_env()?;
    let secrets = Secrets::from_env(local_config.provider)?;

    tracing::info!(
        "Starting drop-service with provider {}",
        local_config.provider.as_str()
    );
    if secrets.secret_key.is_empty() {
        tracing::warn!("SECRET_KEY is empty, uploads are not authenticated");
    }

    // Configure CORS
    let cors = match &local_config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins = allowed_origins
                .iter()
                .map(|origin| {
                    origin
                        .parse()
                        .map_err(|_| StartupError::Cors(origin.clone()))
                })
                .collect::<Result<Vec<HeaderValue>, _>>()?;
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let metadata_repository = Arc::new(JsonMetadataRepository::new(
        local_config.metadata_file.clone(),
    )) as Arc<dyn MetadataRepository>;
    let metadata_store = MetadataStore::load(metadata_repository).await?;
    if metadata_store.is_empty() {
        tracing::info!("Metadata store is empty");
    } else {
        tracing::info!(
            "Loaded {} entries from {}",
            metadata_store.len(),
            local_config.metadata_file.display()
        );
    }

    let storage_service = services::create_storage_service(&local_config, &secrets).await?;

    let port = local_config.port;
    let app_state = AppState {
        secrets: Arc::new(secrets),
        local_config: Arc::new(local_config),
        metadata_store: Arc::new(metadata_store),
        storage_service,
    };

    let router = create_router(app_state).layer(cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router).await?;
    Ok(())
}
