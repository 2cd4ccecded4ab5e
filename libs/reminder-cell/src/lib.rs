// libs/reminder-cell/src/lib.rs
//! # Reminder Cell
//!
//! The two daily notification jobs:
//!
//! - **Appointment reminder** (09:00): every active, booked slot dated today
//!   gets an SMS and an email.
//! - **Birthday wish** (08:00): every active member born on today's month and
//!   day gets an SMS.
//!
//! Each run drains its query, composes all messages, then delivers them record
//! by record. Channel failures are kept in the [`RunReport`]; query and
//! composition failures abort the run with a [`ReminderError`].
//!
//! Jobs fire from [`build_scheduler`] and can be triggered by hand through
//! `POST /admin/jobs/{job}/run` with `Authorization: Bearer <ADMIN_API_KEY>`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::ReminderError;
pub use models::{DeliveryOutcome, DeliveryStatus, JobKind, Notification, RunReport};
pub use router::reminder_routes;
pub use services::appointment::AppointmentReminderJob;
pub use services::birthday::BirthdayWishJob;
pub use services::reminder::ReminderService;
pub use services::scheduler::{build_scheduler, run_scheduled, ReminderScheduler};
