use chrono::NaiveDate;

/// `M/dd/yyyy`, the format appointment slots are stored with (`6/10/2024`).
pub fn appointment_date_key(date: NaiveDate) -> String {
    date.format("%-m/%d/%Y").to_string()
}

/// `M/dd`, matched as a substring of the stored date of birth (`6/10`).
pub fn birthday_key(date: NaiveDate) -> String {
    date.format("%-m/%d").to_string()
}

/// `-MM-dd`, the month/day tail of an ISO `yyyy-MM-dd` date of birth.
pub fn iso_birthday_key(date: NaiveDate) -> String {
    date.format("-%m-%d").to_string()
}
