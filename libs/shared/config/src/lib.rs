use std::env;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_APPOINTMENT_COLLECTION: &str = "AppointmentMaster";
pub const DEFAULT_USER_COLLECTION: &str = "User";
pub const DEFAULT_APPOINTMENT_REMINDER_CRON: &str = "0 0 9 * * *";
pub const DEFAULT_BIRTHDAY_WISH_CRON: &str = "0 0 8 * * *";
pub const DEFAULT_SMS_COUNTRY_CODE: &str = "+91";
pub const DEFAULT_EMAIL_SENDER_NAME: &str = "Holistic Fitness";
pub const DEFAULT_COSMOS_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";
pub const DEFAULT_SEND_GRID_BASE_URL: &str = "https://api.sendgrid.com";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cosmosdb_connection: String,
    pub cosmosdb_database_name: String,
    pub cosmosdb_page_size: u32,
    pub appointment_collection: String,
    pub user_collection: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub twilio_base_url: String,
    pub send_grid_api_key: String,
    pub send_grid_base_url: String,
    pub email_sender_address: String,
    pub email_sender_name: String,
    /// Prefix put in front of every stored phone number before sending an SMS
    pub sms_country_code: String,
    pub appointment_reminder_cron: String,
    pub birthday_wish_cron: String,
    /// Bearer key the `/admin` routes require
    pub admin_api_key: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads and validates the process environment. Every required variable
    /// has to be present and non-empty, otherwise the process must not start.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(ConfigError::Missing(name)),
            }
        };

        let optional = |name: &'static str, default: &str| -> String {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => default.to_string(),
            }
        };

        let config = Self {
            cosmosdb_connection: required("COSMOSDB_CONNECTION")?,
            cosmosdb_database_name: required("COSMOSDB_DATABASE_NAME")?,
            cosmosdb_page_size: parse_number(
                "COSMOSDB_PAGE_SIZE",
                lookup("COSMOSDB_PAGE_SIZE"),
                DEFAULT_COSMOS_PAGE_SIZE,
            )?,
            appointment_collection: optional("APPOINTMENT_COLLECTION", DEFAULT_APPOINTMENT_COLLECTION),
            user_collection: optional("USER_COLLECTION", DEFAULT_USER_COLLECTION),
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            twilio_phone_number: required("TWILIO_PHONE_NUMBER")?,
            twilio_base_url: optional("TWILIO_BASE_URL", DEFAULT_TWILIO_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            send_grid_api_key: required("SEND_GRID_API")?,
            send_grid_base_url: optional("SEND_GRID_BASE_URL", DEFAULT_SEND_GRID_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            email_sender_address: required("EMAIL_ADD")?,
            email_sender_name: optional("EMAIL_SENDER_NAME", DEFAULT_EMAIL_SENDER_NAME),
            sms_country_code: optional("SMS_COUNTRY_CODE", DEFAULT_SMS_COUNTRY_CODE),
            appointment_reminder_cron: optional(
                "APPOINTMENT_REMINDER_CRON",
                DEFAULT_APPOINTMENT_REMINDER_CRON,
            ),
            birthday_wish_cron: optional("BIRTHDAY_WISH_CRON", DEFAULT_BIRTHDAY_WISH_CRON),
            admin_api_key: required("ADMIN_API_KEY")?,
            port: parse_number("PORT", lookup("PORT"), DEFAULT_PORT)?,
        };

        config.validate()?;
        info!(
            database = %config.cosmosdb_database_name,
            appointments = %config.appointment_collection,
            users = %config.user_collection,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.sms_country_code.starts_with('+')
            || self.sms_country_code.len() < 2
            || !self.sms_country_code[1..].chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Invalid {
                name: "SMS_COUNTRY_CODE",
                value: self.sms_country_code.clone(),
                reason: "expected '+' followed by digits".to_string(),
            });
        }

        if !self.email_sender_address.contains('@') {
            return Err(ConfigError::Invalid {
                name: "EMAIL_ADD",
                value: self.email_sender_address.clone(),
                reason: "not an email address".to_string(),
            });
        }

        if self.cosmosdb_page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "COSMOSDB_PAGE_SIZE",
                value: "0".to_string(),
                reason: "page size must be positive".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_number<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                value: value.clone(),
                reason: e.to_string(),
            })
        }
        _ => {
            warn!("{} not set, using default {}", name, default);
            Ok(default)
        }
    }
}
