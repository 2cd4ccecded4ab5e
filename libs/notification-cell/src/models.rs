// libs/notification-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==============================================================================
// CHANNEL MESSAGES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Sms => write!(f, "sms"),
            Channel::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Recipient with country code, e.g. `+919876543210`
    pub to: String,
    pub from: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsReceipt {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub subject: String,
    pub plain_text: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub status: u16,
    pub message_id: Option<String>,
}

// ==============================================================================
// PROVIDER WIRE FORMATS
// ==============================================================================

/// Error body Twilio returns on 4xx/5xx.
#[derive(Debug, Deserialize)]
pub(crate) struct TwilioErrorBody {
    pub code: Option<u32>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendGridMail<'a> {
    pub personalizations: Vec<SendGridPersonalization<'a>>,
    pub from: &'a EmailAddress,
    pub subject: &'a str,
    pub content: Vec<SendGridContent<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendGridPersonalization<'a> {
    pub to: Vec<&'a EmailAddress>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendGridContent<'a> {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub value: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendGridMail<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        // SendGrid requires text/plain to come before text/html
        Self {
            personalizations: vec![SendGridPersonalization {
                to: vec![&message.to],
            }],
            from: &message.from,
            subject: &message.subject,
            content: vec![
                SendGridContent {
                    content_type: "text/plain",
                    value: &message.plain_text,
                },
                SendGridContent {
                    content_type: "text/html",
                    value: &message.html,
                },
            ],
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("SMS to {to} rejected (HTTP {status}): {message}")]
    SmsRejected {
        to: String,
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Email to {to} rejected (HTTP {status}): {message}")]
    EmailRejected {
        to: String,
        status: u16,
        message: String,
    },

    #[error("{channel} transport error: {message}")]
    Transport { channel: Channel, message: String },
}

impl NotificationError {
    pub fn transport(channel: Channel, err: reqwest::Error) -> Self {
        NotificationError::Transport {
            channel,
            message: err.to_string(),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            NotificationError::SmsRejected { .. } => Channel::Sms,
            NotificationError::EmailRejected { .. } => Channel::Email,
            NotificationError::Transport { channel, .. } => *channel,
        }
    }
}
