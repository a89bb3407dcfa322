use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Loose shape check: something, `@`, something, `.`, something, no whitespace.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Length is counted in UTF-16 code units, the unit browser form fields
/// measure, so an emoji counts as two.
pub fn validate_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

/// Present and not just whitespace.
pub fn validate_required(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("buyer@example.com"));
        assert!(validate_email("a@b.lk"));
        assert!(validate_email("first.last@sub.domain.org"));
        assert!(!validate_email("buyer@example"));
        assert!(!validate_email("buyer example@test.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("buyer@@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn password_needs_six_characters() {
        assert!(!validate_password(""));
        assert!(!validate_password("12345"));
        assert!(validate_password("123456"));
        assert!(validate_password("ශ්‍රී ලංකා"));
        assert!(validate_password("😀😀😀"));
        assert!(!validate_password("😀😀"));
    }

    #[test]
    fn required_rejects_blank_and_missing() {
        assert!(validate_required(Some("Colombo")));
        assert!(validate_required(Some("  x ")));
        assert!(!validate_required(Some("   ")));
        assert!(!validate_required(Some("")));
        assert!(!validate_required(None));
    }
}
