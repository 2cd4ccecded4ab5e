/// Builds the E.164-style recipient for a locally stored phone number.
///
/// Numbers are kept without a country code in the member database, so the
/// configured prefix is prepended. Spaces and dashes are dropped; a number
/// that already starts with `+` is passed through untouched.
pub fn format_recipient(country_code: &str, phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if digits.starts_with('+') {
        digits
    } else {
        format!("{}{}", country_code, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_country_code() {
        assert_eq!(format_recipient("+91", "9876543210"), "+919876543210");
        assert_eq!(format_recipient("+44", "7700900123"), "+447700900123");
    }

    #[test]
    fn test_strips_separators() {
        assert_eq!(format_recipient("+91", " 98765-43210 "), "+919876543210");
    }

    #[test]
    fn test_keeps_international_numbers() {
        assert_eq!(format_recipient("+91", "+15005550006"), "+15005550006");
    }
}
