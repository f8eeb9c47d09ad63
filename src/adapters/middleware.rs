use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::{
    application::{error::ApplicationError, services::auth_gate::is_authorized},
    domain::config::secrets::Secrets,
};

pub const SECRET_KEY_HEADER: &str = "X-Clioud-Key";

/// Rejects the request before its body is read unless the secret key header
/// matches the configured one.
pub async fn validate_secret_key(
    State(secrets): State<Arc<Secrets>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    let supplied = match headers.get(SECRET_KEY_HEADER) {
        Some(value) => match value.to_str() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("{} header contains invalid UTF-8", SECRET_KEY_HEADER);
                None
            }
        },
        None => None,
    };

    if is_authorized(&secrets.secret_key, supplied) {
        next.run(request).await
    } else {
        ApplicationError::Unauthorized.into_response()
    }
}
