pub mod sendgrid;
pub mod twilio;

pub use sendgrid::*;
pub use twilio::*;

use async_trait::async_trait;

use crate::models::{EmailMessage, EmailReceipt, NotificationError, SmsMessage, SmsReceipt};

/// Outbound SMS gateway.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, message: &SmsMessage) -> Result<SmsReceipt, NotificationError>;
}

/// Outbound email gateway.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, NotificationError>;
}
