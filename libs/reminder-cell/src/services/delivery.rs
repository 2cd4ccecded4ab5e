// libs/reminder-cell/src/services/delivery.rs
use tracing::{error, info};

use notification_cell::{Channel, EmailSender, SmsSender};

use crate::models::{DeliveryOutcome, DeliveryStatus, Notification};

/// Sends one record's messages. A failed SMS skips the email; channel errors
/// end up in the outcome and never escape.
pub async fn deliver(
    notification: Notification,
    sms: &dyn SmsSender,
    email: Option<&dyn EmailSender>,
) -> DeliveryOutcome {
    let record_id = notification.record_id;

    let sms_sid = match sms.send_sms(&notification.sms).await {
        Ok(receipt) => receipt.sid,
        Err(e) => {
            error!(record_id = %record_id, channel = %Channel::Sms, "Delivery failed: {}", e);
            return DeliveryOutcome {
                record_id,
                status: DeliveryStatus::SmsFailed { error: e.to_string() },
            };
        }
    };

    let (message, sender) = match (notification.email, email) {
        (Some(message), Some(sender)) => (message, sender),
        _ => {
            info!(record_id = %record_id, sms_sid = %sms_sid, "Delivered");
            return DeliveryOutcome {
                record_id,
                status: DeliveryStatus::Delivered {
                    sms_sid,
                    email_message_id: None,
                },
            };
        }
    };

    match sender.send_email(&message).await {
        Ok(receipt) => {
            info!(record_id = %record_id, sms_sid = %sms_sid, "Delivered");
            DeliveryOutcome {
                record_id,
                status: DeliveryStatus::Delivered {
                    sms_sid,
                    email_message_id: receipt.message_id,
                },
            }
        }
        Err(e) => {
            error!(record_id = %record_id, channel = %Channel::Email, "Delivery failed: {}", e);
            DeliveryOutcome {
                record_id,
                status: DeliveryStatus::EmailFailed {
                    sms_sid,
                    error: e.to_string(),
                },
            }
        }
    }
}
