// libs/reminder-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use notification_cell::{EmailMessage, SmsMessage};

use crate::error::ReminderError;

// ==============================================================================
// JOBS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    AppointmentReminder,
    BirthdayWish,
}

impl JobKind {
    pub const ALL: [JobKind; 2] = [JobKind::AppointmentReminder, JobKind::BirthdayWish];
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::AppointmentReminder => write!(f, "appointment-reminder"),
            JobKind::BirthdayWish => write!(f, "birthday-wish"),
        }
    }
}

impl FromStr for JobKind {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointment-reminder" => Ok(JobKind::AppointmentReminder),
            "birthday-wish" => Ok(JobKind::BirthdayWish),
            other => Err(ReminderError::UnknownJob(other.to_string())),
        }
    }
}

// ==============================================================================
// PER-RECORD OUTCOMES
// ==============================================================================

/// Messages composed for one record before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub record_id: String,
    pub sms: SmsMessage,
    pub email: Option<EmailMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered {
        sms_sid: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        email_message_id: Option<String>,
    },
    /// The SMS failed; the email for the same record was not attempted.
    SmsFailed { error: String },
    EmailFailed { sms_sid: String, error: String },
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub record_id: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

// ==============================================================================
// RUN REPORT
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub job: JobKind,
    /// The date key the query ran with, e.g. `6/10/2024` or `6/10`
    pub run_date: String,
    pub matched: usize,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl RunReport {
    pub fn new(job: JobKind, run_date: impl Into<String>) -> Self {
        Self {
            job,
            run_date: run_date.into(),
            matched: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_delivered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_kind_round_trips_through_its_name() {
        for kind in JobKind::ALL {
            assert_eq!(kind.to_string().parse::<JobKind>().unwrap(), kind);
        }
        assert!(matches!(
            "weekly-digest".parse::<JobKind>(),
            Err(ReminderError::UnknownJob(name)) if name == "weekly-digest"
        ));
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new(JobKind::AppointmentReminder, "6/10/2024");
        report.matched = 3;
        report.outcomes = vec![
            DeliveryOutcome {
                record_id: "a".into(),
                status: DeliveryStatus::Delivered {
                    sms_sid: "SM1".into(),
                    email_message_id: Some("m1".into()),
                },
            },
            DeliveryOutcome {
                record_id: "b".into(),
                status: DeliveryStatus::SmsFailed { error: "rejected".into() },
            },
            DeliveryOutcome {
                record_id: "c".into(),
                status: DeliveryStatus::EmailFailed {
                    sms_sid: "SM3".into(),
                    error: "rejected".into(),
                },
            },
        ];

        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failed(), 2);
    }

    #[test]
    fn test_report_json() {
        let mut report = RunReport::new(JobKind::BirthdayWish, "6/10");
        report.matched = 1;
        report.outcomes.push(DeliveryOutcome {
            record_id: "u1".into(),
            status: DeliveryStatus::Delivered {
                sms_sid: "SM9".into(),
                email_message_id: None,
            },
        });

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "job": "birthday-wish",
                "run_date": "6/10",
                "matched": 1,
                "outcomes": [{ "record_id": "u1", "status": "delivered", "sms_sid": "SM9" }]
            })
        );
    }
}
