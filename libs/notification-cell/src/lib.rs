// libs/notification-cell/src/lib.rs
//! # Notification Cell
//!
//! Outbound channels used to reach clients:
//!
//! - **SMS** through Twilio Programmable Messaging ([`TwilioClient`])
//! - **Email** through SendGrid v3 Mail Send ([`SendGridClient`])
//!
//! Both sit behind the [`SmsSender`] and [`EmailSender`] traits so callers can
//! swap in mocks. Every failure, whether the provider rejected the message or
//! the request never got through, surfaces as a [`NotificationError`] tagged
//! with its [`Channel`].
//!
//! ## Configuration
//!
//! - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` - basic auth for Twilio
//! - `SEND_GRID_API` - bearer key for SendGrid
//! - `TWILIO_BASE_URL`, `SEND_GRID_BASE_URL` - optional overrides

pub mod models;
pub mod services;

pub use models::{
    Channel, EmailAddress, EmailMessage, EmailReceipt, NotificationError, SmsMessage, SmsReceipt,
};

pub use services::{EmailSender, SendGridClient, SmsSender, TwilioClient, UNKNOWN_SID};
