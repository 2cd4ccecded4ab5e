// libs/reminder-cell/src/middleware.rs
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use shared_models::error::AppError;

use crate::services::reminder::ReminderService;

/// Guards the `/admin` routes with the configured `ADMIN_API_KEY` sent as a
/// bearer token.
pub async fn admin_auth_middleware(
    State(service): State<Arc<ReminderService>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_value = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    let key = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    if key != service.config().admin_api_key {
        warn!("Rejected admin request to {}", request.uri().path());
        return Err(AppError::Auth("Invalid admin key".to_string()));
    }

    Ok(next.run(request).await)
}
