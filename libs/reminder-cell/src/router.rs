// libs/reminder-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::middleware::admin_auth_middleware;
use crate::services::reminder::ReminderService;

pub fn reminder_routes(service: Arc<ReminderService>) -> Router {
    // Manual runs send real messages, so they need the admin key
    let admin_routes = Router::new()
        .route("/admin/jobs/{job}/run", post(handlers::run_job))
        .layer(middleware::from_fn_with_state(service.clone(), admin_auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(admin_routes)
        .with_state(service)
}
