use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A booked slot in the appointment collection.
///
/// Documents are written by the booking app, so every text field is optional
/// on the wire. `modified_by` holds the display name of the provider the
/// client is seeing and is what reminder texts refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub modified_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub modified_date: Option<String>,
}

impl AppointmentRecord {
    pub fn provider_name(&self) -> Option<&str> {
        self.modified_by.as_deref()
    }

    pub fn start_time(&self) -> Option<&str> {
        self.from.as_deref()
    }
}

/// A member profile from the user collection. Only the fields the greeting
/// needs are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Reads a text field that some writers store as a number or boolean, e.g. a
/// phone saved as `9876543210`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "object" }),
            &"a string",
        )),
    }
}
