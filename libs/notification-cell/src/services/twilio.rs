// libs/notification-cell/src/services/twilio.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;

use crate::models::{Channel, NotificationError, SmsMessage, SmsReceipt, TwilioErrorBody};
use crate::services::SmsSender;

/// Recorded when Twilio accepts a message but its response cannot be read.
pub const UNKNOWN_SID: &str = "unknown";

/// Twilio Programmable Messaging client
/// Based on: https://www.twilio.com/docs/messaging/api/message-resource#create-a-message-resource
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            base_url: config.twilio_base_url.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    /// POST /2010-04-01/Accounts/{AccountSid}/Messages.json
    async fn send_sms(&self, message: &SmsMessage) -> Result<SmsReceipt, NotificationError> {
        let url = self.messages_url();
        debug!("Sending SMS to {} via {}", message.to, url);

        let form = [
            ("To", message.to.as_str()),
            ("From", message.from.as_str()),
            ("Body", message.body.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| NotificationError::transport(Channel::Sms, e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| NotificationError::transport(Channel::Sms, e))?;

        if !status.is_success() {
            let (code, message_text) = match serde_json::from_str::<TwilioErrorBody>(&response_text) {
                Ok(body) => (body.code, body.message.unwrap_or(response_text)),
                Err(_) => (None, response_text),
            };

            error!("Twilio rejected SMS to {}: {} - {}", message.to, status, message_text);
            return Err(NotificationError::SmsRejected {
                to: message.to.clone(),
                status: status.as_u16(),
                code,
                message: message_text,
            });
        }

        // Twilio accepted the message; an unreadable body only costs us the sid
        let receipt = serde_json::from_str::<SmsReceipt>(&response_text).unwrap_or_else(|e| {
            warn!("Unreadable message resource for {} ({}): {}", message.to, status, e);
            SmsReceipt {
                sid: UNKNOWN_SID.to_string(),
                status: None,
            }
        });

        info!("SMS queued for {} with sid {}", message.to, receipt.sid);
        Ok(receipt)
    }
}
