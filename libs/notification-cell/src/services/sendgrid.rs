// libs/notification-cell/src/services/sendgrid.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{Channel, EmailMessage, EmailReceipt, NotificationError, SendGridMail};
use crate::services::EmailSender;

/// SendGrid v3 Mail Send client
/// Based on: https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send
pub struct SendGridClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SendGridClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.send_grid_api_key.clone(),
            base_url: config.send_grid_base_url.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridClient {
    /// POST /v3/mail/send
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, NotificationError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        debug!("Sending email to {} via {}", message.to.email, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&SendGridMail::from(message))
            .send()
            .await
            .map_err(|e| NotificationError::transport(Channel::Email, e))?;

        let status = response.status();
        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| NotificationError::transport(Channel::Email, e))?;

            error!(
                "SendGrid rejected email to {}: {} - {}",
                message.to.email, status, response_text
            );
            return Err(NotificationError::EmailRejected {
                to: message.to.email.clone(),
                status: status.as_u16(),
                message: response_text,
            });
        }

        info!("Email accepted for {} (status {})", message.to.email, status);
        Ok(EmailReceipt {
            status: status.as_u16(),
            message_id,
        })
    }
}
