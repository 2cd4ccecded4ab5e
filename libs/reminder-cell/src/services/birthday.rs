// libs/reminder-cell/src/services/birthday.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use notification_cell::SmsSender;
use shared_config::AppConfig;
use shared_database::{DocumentQuery, DocumentStore, Filter};
use shared_models::UserRecord;
use shared_utils::{birthday_key, iso_birthday_key};

use crate::error::ReminderError;
use crate::models::{JobKind, Notification, RunReport};
use crate::services::delivery::deliver;
use crate::services::messages::compose_birthday;

pub struct BirthdayWishJob {
    store: Arc<dyn DocumentStore>,
    sms: Arc<dyn SmsSender>,
    config: Arc<AppConfig>,
}

impl BirthdayWishJob {
    pub fn new(store: Arc<dyn DocumentStore>, sms: Arc<dyn SmsSender>, config: Arc<AppConfig>) -> Self {
        Self { store, sms, config }
    }

    /// Active members whose date of birth contains today's `M/dd`, or the
    /// `-MM-dd` tail when it is stored as an ISO date.
    ///
    /// This is a substring match: on 1/06 a `11/06/1990` birthday matches too.
    pub fn filter(today: NaiveDate) -> Filter {
        Filter::contains("dateOfBirth", birthday_key(today))
            .or(Filter::contains("dateOfBirth", iso_birthday_key(today)))
            .and(Filter::eq("isActive", true))
    }

    #[instrument(skip(self), fields(job = %JobKind::BirthdayWish))]
    pub async fn run(&self, today: NaiveDate) -> Result<RunReport, ReminderError> {
        let mut report = RunReport::new(JobKind::BirthdayWish, birthday_key(today));

        let records: Vec<UserRecord> = DocumentQuery::new(
            self.store.as_ref(),
            &self.config.user_collection,
            Self::filter(today),
        )
        .drain()
        .await?;

        report.matched = records.len();
        info!("{} members celebrating on {}", report.matched, report.run_date);

        let notifications = records
            .iter()
            .map(|record| compose_birthday(record, &self.config))
            .collect::<Result<Vec<Notification>, _>>()?;

        for notification in notifications {
            report
                .outcomes
                .push(deliver(notification, self.sms.as_ref(), None).await);
        }

        info!(
            delivered = report.delivered(),
            failed = report.failed(),
            "Birthday wishes finished"
        );
        Ok(report)
    }
}
