use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating geographic codes (region, province, district)
    /// Codes are 2 to 6 digits: 2 for regions, 4 for provinces, 6 for districts
    /// - Valid: "15", "1501", "150101"
    /// - Invalid: "1", "15a", "15-01", "1501011"
    pub static ref CODE_REGEX: Regex = Regex::new(r"^[0-9]{2,6}$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_regex_valid() {
        assert!(CODE_REGEX.is_match("15"));
        assert!(CODE_REGEX.is_match("1501"));
        assert!(CODE_REGEX.is_match("150101"));
        assert!(CODE_REGEX.is_match("01"));
    }

    #[test]
    fn test_code_regex_invalid() {
        assert!(!CODE_REGEX.is_match("1")); // too short
        assert!(!CODE_REGEX.is_match("1501011")); // too long
        assert!(!CODE_REGEX.is_match("15a")); // letters
        assert!(!CODE_REGEX.is_match("15-01")); // separator
        assert!(!CODE_REGEX.is_match("")); // empty
        assert!(!CODE_REGEX.is_match("15 01")); // space
    }

    #[test]
    fn test_username_regex() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(!USERNAME_REGEX.is_match("123user"));
        assert!(!USERNAME_REGEX.is_match("user-name"));
    }
}
