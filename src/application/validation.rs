use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid regex pattern")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks password complexity, returning the first rule that fails.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    if !password.chars().any(char::is_numeric) {
        return Err("Password must contain at least one number");
    }
    if !password.chars().any(char::is_uppercase) {
        return Err("Password must contain at least one uppercase letter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_common_addresses() {
        assert!(validate_email("alice@example.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(validate_email("a_b%c-d@host-name.io"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email("plainaddress"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@example"));
        assert!(!validate_email("user@example.c"));
        assert!(!validate_email("user name@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_password_reports_rules_in_order() {
        assert_eq!(
            validate_password("Ab1"),
            Err("Password must be at least 8 characters")
        );
        assert_eq!(
            validate_password("Abcdefgh"),
            Err("Password must contain at least one number")
        );
        assert_eq!(
            validate_password("abcdefg1"),
            Err("Password must contain at least one uppercase letter")
        );
        assert_eq!(validate_password("Abcdefg1"), Ok(()));
    }

    #[test]
    fn test_validate_password_accepts_non_ascii_digits() {
        assert_eq!(validate_password("Abcdefg\u{0663}"), Ok(()));
        assert_eq!(validate_password("Abcdefg\u{FF17}"), Ok(()));
        assert_eq!(
            validate_password("Abcdefgé"),
            Err("Password must contain at least one number")
        );
    }
}
