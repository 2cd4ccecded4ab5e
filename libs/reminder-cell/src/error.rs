use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::AppError;

/// Errors that abort a whole run. Channel failures never show up here; they
/// are recorded per record in the run report.
#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Query failed: {0}")]
    Query(#[from] DatabaseError),

    #[error("Record {record_id} has no {field} to build the message from")]
    Composition {
        record_id: String,
        field: &'static str,
    },

    #[error("Unknown job: {0}")]
    UnknownJob(String),
}

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::Query(e) => AppError::Database(e.to_string()),
            ReminderError::UnknownJob(name) => AppError::NotFound(format!("job '{}'", name)),
            composition @ ReminderError::Composition { .. } => {
                AppError::Internal(composition.to_string())
            }
        }
    }
}
