use std::sync::Arc;

use axum::{routing::get, Router};

use reminder_cell::{reminder_routes, ReminderService};

pub fn create_router(service: Arc<ReminderService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Holistic Fitness notifier is running!" }))
        .merge(reminder_routes(service))
}
