// libs/reminder-cell/src/services/appointment.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use notification_cell::{EmailSender, SmsSender};
use shared_config::AppConfig;
use shared_database::{DocumentQuery, DocumentStore, Filter};
use shared_models::AppointmentRecord;
use shared_utils::appointment_date_key;

use crate::error::ReminderError;
use crate::models::{JobKind, Notification, RunReport};
use crate::services::delivery::deliver;
use crate::services::messages::compose_appointment;

/// Texts and emails every client with a booked slot today.
pub struct AppointmentReminderJob {
    store: Arc<dyn DocumentStore>,
    sms: Arc<dyn SmsSender>,
    email: Arc<dyn EmailSender>,
    config: Arc<AppConfig>,
}

impl AppointmentReminderJob {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        sms: Arc<dyn SmsSender>,
        email: Arc<dyn EmailSender>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            sms,
            email,
            config,
        }
    }

    /// Booked, active slots on `date_key` (`M/dd/yyyy`).
    pub fn filter(date_key: &str) -> Filter {
        Filter::eq("date", date_key)
            .and(Filter::eq("isActive", true))
            .and(Filter::eq("isAvailable", false))
    }

    #[instrument(skip(self), fields(job = %JobKind::AppointmentReminder))]
    pub async fn run(&self, today: NaiveDate) -> Result<RunReport, ReminderError> {
        let date_key = appointment_date_key(today);
        let mut report = RunReport::new(JobKind::AppointmentReminder, date_key.clone());

        let records: Vec<AppointmentRecord> = DocumentQuery::new(
            self.store.as_ref(),
            &self.config.appointment_collection,
            Self::filter(&date_key),
        )
        .drain()
        .await?;

        report.matched = records.len();
        info!("{} appointments booked for {}", report.matched, date_key);

        let notifications = records
            .iter()
            .map(|record| compose_appointment(record, &self.config))
            .collect::<Result<Vec<Notification>, _>>()?;

        for notification in notifications {
            let outcome = deliver(notification, self.sms.as_ref(), Some(self.email.as_ref())).await;
            report.outcomes.push(outcome);
        }

        info!(
            delivered = report.delivered(),
            failed = report.failed(),
            "Appointment reminders finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use mockall::{mock, predicate::function};
    use notification_cell::{
        EmailMessage, EmailReceipt, NotificationError, SmsMessage, SmsReceipt,
    };
    use shared_database::InMemoryDocumentStore;
    use shared_utils::test_utils::{TestAppointment, TestConfig};

    use crate::models::DeliveryStatus;

    mock! {
        pub Sms {}

        #[async_trait]
        impl SmsSender for Sms {
            async fn send_sms(&self, message: &SmsMessage) -> Result<SmsReceipt, NotificationError>;
        }
    }

    mock! {
        pub Email {}

        #[async_trait]
        impl EmailSender for Email {
            async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, NotificationError>;
        }
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn receipt(sid: &str) -> SmsReceipt {
        SmsReceipt {
            sid: sid.to_string(),
            status: Some("queued".to_string()),
        }
    }

    fn rejected(to: &str) -> NotificationError {
        NotificationError::SmsRejected {
            to: to.to_string(),
            status: 400,
            code: Some(21211),
            message: "invalid number".to_string(),
        }
    }

    async fn store_with(documents: Vec<serde_json::Value>) -> Arc<InMemoryDocumentStore> {
        let store = Arc::new(InMemoryDocumentStore::new(2));
        store.insert("AppointmentMaster", documents).await;
        store
    }

    fn job(store: Arc<InMemoryDocumentStore>, sms: MockSms, email: MockEmail) -> AppointmentReminderJob {
        AppointmentReminderJob::new(
            store,
            Arc::new(sms),
            Arc::new(email),
            TestConfig::default().to_arc(),
        )
    }

    #[test]
    fn test_filter_shape() {
        let query = AppointmentReminderJob::filter("6/10/2024").to_query();

        assert_eq!(
            query.query,
            r#"SELECT * FROM c WHERE (c["date"] = @p0 AND c["isActive"] = @p1 AND c["isAvailable"] = @p2)"#
        );
    }

    #[tokio::test]
    async fn test_only_booked_active_slots_today() {
        let store = store_with(vec![
            TestAppointment::booked("a1", "6/10/2024").to_document(),
            TestAppointment::booked("a2", "6/10/2024").available().to_document(),
            TestAppointment::booked("a3", "6/10/2024").inactive().to_document(),
            TestAppointment::booked("a4", "6/11/2024").to_document(),
        ])
        .await;

        let mut sms = MockSms::new();
        sms.expect_send_sms()
            .with(function(|m: &SmsMessage| {
                m.to == "+919876543210"
                    && m.body == "Reminder! You have an appointment today with Dr. Rao at 10:00 AM. Thank you, Holistic Fitness"
            }))
            .times(1)
            .returning(|_| Ok(receipt("SM1")));

        let mut email = MockEmail::new();
        email
            .expect_send_email()
            .with(function(|m: &EmailMessage| m.to.email == "a1@example.com"))
            .times(1)
            .returning(|_| {
                Ok(EmailReceipt {
                    status: 202,
                    message_id: Some("msg-1".to_string()),
                })
            });

        let report = job(store, sms, email).run(june_10()).await.unwrap();

        assert_eq!(report.run_date, "6/10/2024");
        assert_eq!(report.matched, 1);
        assert_eq!(
            report.outcomes[0].status,
            DeliveryStatus::Delivered {
                sms_sid: "SM1".to_string(),
                email_message_id: Some("msg-1".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_sms_failure_skips_email() {
        let store = store_with(vec![TestAppointment::booked("a1", "6/10/2024").to_document()]).await;

        let mut sms = MockSms::new();
        sms.expect_send_sms()
            .times(1)
            .returning(|m| Err(rejected(&m.to)));

        let mut email = MockEmail::new();
        email.expect_send_email().never();

        let report = job(store, sms, email).run(june_10()).await.unwrap();

        assert_eq!(report.failed(), 1);
        assert_matches!(&report.outcomes[0].status, DeliveryStatus::SmsFailed { error } if error.contains("invalid number"));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_rest() {
        let store = store_with(vec![
            TestAppointment::booked("a1", "6/10/2024").phone("1111111111").to_document(),
            TestAppointment::booked("a2", "6/10/2024").phone("2222222222").to_document(),
            TestAppointment::booked("a3", "6/10/2024").phone("3333333333").to_document(),
        ])
        .await;

        let mut sms = MockSms::new();
        sms.expect_send_sms().times(3).returning(|m| {
            if m.to == "+912222222222" {
                Err(rejected(&m.to))
            } else {
                Ok(receipt("SMok"))
            }
        });

        let mut email = MockEmail::new();
        email.expect_send_email().times(2).returning(|_| {
            Ok(EmailReceipt {
                status: 202,
                message_id: None,
            })
        });

        let report = job(store, sms, email).run(june_10()).await.unwrap();

        assert_eq!(report.matched, 3);
        assert_eq!(report.delivered(), 2);
        assert_matches!(report.outcomes[1].status, DeliveryStatus::SmsFailed { .. });
    }

    #[tokio::test]
    async fn test_email_rejection_is_recorded() {
        let store = store_with(vec![TestAppointment::booked("a1", "6/10/2024").to_document()]).await;

        let mut sms = MockSms::new();
        sms.expect_send_sms().times(1).returning(|_| Ok(receipt("SM1")));

        let mut email = MockEmail::new();
        email.expect_send_email().times(1).returning(|m| {
            Err(NotificationError::EmailRejected {
                to: m.to.email.clone(),
                status: 403,
                message: "forbidden".to_string(),
            })
        });

        let report = job(store, sms, email).run(june_10()).await.unwrap();

        assert_matches!(
            &report.outcomes[0].status,
            DeliveryStatus::EmailFailed { sms_sid, .. } if sms_sid == "SM1"
        );
    }

    #[tokio::test]
    async fn test_nothing_booked_sends_nothing() {
        let store = store_with(vec![TestAppointment::booked("a1", "6/09/2024").to_document()]).await;

        let mut sms = MockSms::new();
        sms.expect_send_sms().never();
        let mut email = MockEmail::new();
        email.expect_send_email().never();

        let report = job(store, sms, email).run(june_10()).await.unwrap();

        assert_eq!(report.matched, 0);
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_record_aborts_before_sending() {
        let mut broken = TestAppointment::booked("a2", "6/10/2024").to_document();
        broken["modifiedBy"] = serde_json::Value::Null;

        let store = store_with(vec![
            TestAppointment::booked("a1", "6/10/2024").to_document(),
            broken,
        ])
        .await;

        let mut sms = MockSms::new();
        sms.expect_send_sms().never();
        let mut email = MockEmail::new();
        email.expect_send_email().never();

        let err = job(store, sms, email).run(june_10()).await.unwrap_err();

        assert_matches!(err, ReminderError::Composition { ref record_id, field: "modifiedBy" } if record_id == "a2");
    }
}
