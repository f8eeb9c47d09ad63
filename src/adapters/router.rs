use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    middleware::validate_secret_key,
    state::AppState,
};

pub fn create_router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.local_config.max_upload_bytes;

    // Routes that require the X-Clioud-Key header when a secret is configured
    let protected_routes = Router::new()
        .route("/send", post(FileController::upload_file))
        .route("/api/v1/files/recent", get(FileController::get_recent_files))
        .route("/api/v1/health", get(HealthController::health_check))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_secret_key,
        ));

    let public_routes = Router::new().route(
        "/api/v1/files/{code}",
        get(FileController::get_file_metadata),
    );

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
