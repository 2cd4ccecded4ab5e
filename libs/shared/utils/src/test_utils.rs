use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub const TEST_COSMOS_KEY: &str = "aG9saXN0aWMtZml0bmVzcy10ZXN0LWtleQ==";
pub const TEST_ADMIN_API_KEY: &str = "test-admin-key";

pub struct TestConfig {
    pub cosmos_endpoint: String,
    pub twilio_base_url: String,
    pub send_grid_base_url: String,
    pub page_size: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            cosmos_endpoint: "http://localhost:8081".to_string(),
            twilio_base_url: "http://localhost:8082".to_string(),
            send_grid_base_url: "http://localhost:8083".to_string(),
            page_size: 100,
        }
    }
}

impl TestConfig {
    /// Points every external service at the same mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            cosmos_endpoint: uri.to_string(),
            twilio_base_url: uri.to_string(),
            send_grid_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            cosmosdb_connection: format!(
                "AccountEndpoint={}/;AccountKey={};",
                self.cosmos_endpoint, TEST_COSMOS_KEY
            ),
            cosmosdb_database_name: "HolisticFitness".to_string(),
            cosmosdb_page_size: self.page_size,
            appointment_collection: "AppointmentMaster".to_string(),
            user_collection: "User".to_string(),
            twilio_account_sid: "AC00000000000000000000000000000000".to_string(),
            twilio_auth_token: "test-auth-token".to_string(),
            twilio_phone_number: "+15005550006".to_string(),
            twilio_base_url: self.twilio_base_url.clone(),
            send_grid_api_key: "SG.test-key".to_string(),
            send_grid_base_url: self.send_grid_base_url.clone(),
            email_sender_address: "care@holisticfitness.in".to_string(),
            email_sender_name: "Holistic Fitness".to_string(),
            sms_country_code: "+91".to_string(),
            appointment_reminder_cron: "0 0 9 * * *".to_string(),
            birthday_wish_cron: "0 0 8 * * *".to_string(),
            admin_api_key: TEST_ADMIN_API_KEY.to_string(),
            port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestAppointment {
    pub id: String,
    pub date: String,
    pub from: String,
    pub phone: String,
    pub email: String,
    pub provider: String,
    pub is_active: bool,
    pub is_available: bool,
}

impl TestAppointment {
    /// A booked, active slot: the kind that gets a reminder.
    pub fn booked(id: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.to_string(),
            from: "10:00 AM".to_string(),
            phone: "9876543210".to_string(),
            email: format!("{}@example.com", id),
            provider: "Dr. Rao".to_string(),
            is_active: true,
            is_available: false,
        }
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn available(mut self) -> Self {
        self.is_available = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "date": self.date,
            "from": self.from,
            "to": "11:00 AM",
            "userId": format!("user-{}", self.id),
            "username": "client",
            "email": self.email,
            "phone": self.phone,
            "isActive": self.is_active,
            "isAvailable": self.is_available,
            "createdBy": "admin",
            "createdDate": "6/01/2024",
            "modifiedBy": self.provider,
            "modifiedDate": "6/01/2024",
            "_rid": "AAAAAA==",
            "_ts": 1717200000
        })
    }
}

pub fn user_document(id: &str, name: &str, phone: &str, date_of_birth: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "phone": phone,
        "dateOfBirth": date_of_birth,
        "isActive": is_active,
        "_rid": "BBBBBB=="
    })
}

pub struct MockResponses;

impl MockResponses {
    pub fn cosmos_page(documents: Vec<Value>) -> Value {
        let count = documents.len();
        json!({
            "_rid": "AAAAAA==",
            "Documents": documents,
            "_count": count
        })
    }

    pub fn twilio_message(sid: &str, to: &str) -> Value {
        json!({
            "sid": sid,
            "to": to,
            "from": "+15005550006",
            "status": "queued",
            "num_segments": "1",
            "error_code": null,
            "error_message": null
        })
    }

    pub fn twilio_error(code: u32, message: &str) -> Value {
        json!({
            "code": code,
            "message": message,
            "more_info": format!("https://www.twilio.com/docs/errors/{}", code),
            "status": 400
        })
    }

    pub fn send_grid_error(message: &str) -> Value {
        json!({
            "errors": [{ "message": message, "field": null, "help": null }]
        })
    }
}
