pub mod dates;
pub mod phone;
pub mod test_utils;

pub use dates::{appointment_date_key, birthday_key, iso_birthday_key};
pub use phone::format_recipient;
