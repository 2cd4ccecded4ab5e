// libs/reminder-cell/src/services/messages.rs
use notification_cell::{EmailAddress, EmailMessage, SmsMessage};
use shared_config::AppConfig;
use shared_models::{AppointmentRecord, UserRecord};
use shared_utils::format_recipient;

use crate::error::ReminderError;
use crate::models::Notification;

// The subject typo is what clients have always received.
pub const APPOINTMENT_SUBJECT: &str = "Appoinment Reminder for Holistic Fitness";
pub const APPOINTMENT_HTML: &str = "<strong>HOLISTIC FITNESS by Mrinmoyee Sinha</strong>";
pub const CLIENT_DISPLAY_NAME: &str = "Client";

pub fn appointment_sms_body(provider_name: &str, start_time: &str) -> String {
    format!(
        "Reminder! You have an appointment today with {} at {}. Thank you, Holistic Fitness",
        provider_name, start_time
    )
}

pub fn appointment_email_text(provider_name: &str, start_time: &str) -> String {
    format!(
        "You have an appointment today with {} at {}. Thank you, Holistic Fitness",
        provider_name, start_time
    )
}

pub fn birthday_sms_body(name: &str) -> String {
    format!(
        "We wish you a very HAPPY BIRTHDAY {}. We hope you stay fit and healthy as always. Regards, Holistic Fitness",
        name
    )
}

fn required<'a>(
    value: Option<&'a str>,
    record_id: &str,
    field: &'static str,
) -> Result<&'a str, ReminderError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReminderError::Composition {
            record_id: record_id.to_string(),
            field,
        })
}

/// SMS plus email for one booked appointment.
pub fn compose_appointment(
    record: &AppointmentRecord,
    config: &AppConfig,
) -> Result<Notification, ReminderError> {
    let provider_name = required(record.provider_name(), &record.id, "modifiedBy")?;
    let start_time = required(record.start_time(), &record.id, "from")?;
    let phone = required(record.phone.as_deref(), &record.id, "phone")?;
    let email = required(record.email.as_deref(), &record.id, "email")?;

    Ok(Notification {
        record_id: record.id.clone(),
        sms: SmsMessage {
            to: format_recipient(&config.sms_country_code, phone),
            from: config.twilio_phone_number.clone(),
            body: appointment_sms_body(provider_name, start_time),
        },
        email: Some(EmailMessage {
            from: EmailAddress::new(&config.email_sender_address, &config.email_sender_name),
            to: EmailAddress::new(email, CLIENT_DISPLAY_NAME),
            subject: APPOINTMENT_SUBJECT.to_string(),
            plain_text: appointment_email_text(provider_name, start_time),
            html: APPOINTMENT_HTML.to_string(),
        }),
    })
}

/// Birthday greeting, SMS only.
pub fn compose_birthday(record: &UserRecord, config: &AppConfig) -> Result<Notification, ReminderError> {
    let name = required(record.name.as_deref(), &record.id, "name")?;
    let phone = required(record.phone.as_deref(), &record.id, "phone")?;

    Ok(Notification {
        record_id: record.id.clone(),
        sms: SmsMessage {
            to: format_recipient(&config.sms_country_code, phone),
            from: config.twilio_phone_number.clone(),
            body: birthday_sms_body(name),
        },
        email: None,
    })
}
