// libs/reminder-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;

use crate::models::{JobKind, RunReport};
use crate::services::reminder::ReminderService;

#[derive(Debug, Deserialize)]
pub struct RunJobQuery {
    /// Run as if today were this date (`yyyy-mm-dd`); defaults to the local date.
    pub date: Option<String>,
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "notifier",
        "jobs": JobKind::ALL.iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))
}

#[axum::debug_handler]
pub async fn run_job(
    State(service): State<Arc<ReminderService>>,
    Path(job): Path<String>,
    Query(query): Query<RunJobQuery>,
) -> Result<Json<RunReport>, AppError> {
    let kind: JobKind = job.parse()?;
    let today = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
            AppError::BadRequest(format!("date '{}' is not yyyy-mm-dd: {}", raw, e))
        })?,
        None => Local::now().date_naive(),
    };

    info!("Manual run of {} for {}", kind, today);

    let report = service.run(kind, today).await?;
    Ok(Json(report))
}
