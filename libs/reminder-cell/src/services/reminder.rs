// libs/reminder-cell/src/services/reminder.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use notification_cell::{EmailSender, SendGridClient, SmsSender, TwilioClient};
use shared_config::AppConfig;
use shared_database::{CosmosClient, DocumentStore};

use crate::error::ReminderError;
use crate::models::{JobKind, RunReport};
use crate::services::appointment::AppointmentReminderJob;
use crate::services::birthday::BirthdayWishJob;

/// Owns both jobs and the clients they share. Used by the scheduler and by
/// the admin routes.
pub struct ReminderService {
    config: Arc<AppConfig>,
    appointments: AppointmentReminderJob,
    birthdays: BirthdayWishJob,
}

impl ReminderService {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn DocumentStore>,
        sms: Arc<dyn SmsSender>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        let appointments = AppointmentReminderJob::new(
            Arc::clone(&store),
            Arc::clone(&sms),
            email,
            Arc::clone(&config),
        );
        let birthdays = BirthdayWishJob::new(store, sms, Arc::clone(&config));

        Self {
            config,
            appointments,
            birthdays,
        }
    }

    /// Wires Cosmos DB, Twilio and SendGrid from configuration.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, ReminderError> {
        let store: Arc<dyn DocumentStore> = Arc::new(CosmosClient::new(&config)?);
        let sms: Arc<dyn SmsSender> = Arc::new(TwilioClient::new(&config));
        let email: Arc<dyn EmailSender> = Arc::new(SendGridClient::new(&config));

        info!(
            "Reminder service ready for database {}",
            config.cosmosdb_database_name
        );
        Ok(Self::new(config, store, sms, email))
    }

    pub async fn run(&self, kind: JobKind, today: NaiveDate) -> Result<RunReport, ReminderError> {
        match kind {
            JobKind::AppointmentReminder => self.appointments.run(today).await,
            JobKind::BirthdayWish => self.birthdays.run(today).await,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Cron expression (with seconds) the job fires on.
    pub fn schedule_for(&self, kind: JobKind) -> &str {
        match kind {
            JobKind::AppointmentReminder => &self.config.appointment_reminder_cron,
            JobKind::BirthdayWish => &self.config.birthday_wish_cron,
        }
    }
}
