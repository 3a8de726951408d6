//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Check that a string has non-whitespace content
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Validate email shape
///
/// Deliberately permissive: exactly one `@`, at least one `.` somewhere after
/// it, no whitespace. Accepts plenty of addresses no mail server would, which
/// is fine for an intake form; anything without an `@` or a dot is rejected.
pub fn is_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Failed to compile email regex")
    });

    regex.is_match(value)
}

/// Trim surrounding whitespace
pub fn sanitize(value: &str) -> String {
    value.trim().to_string()
}

/// Trim an optional field; blank or absent input becomes `None`
pub fn sanitize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_blank_input() {
        assert!(is_non_empty("a"));
        assert!(is_non_empty("  a  "));
        assert!(!is_non_empty(""));
        assert!(!is_non_empty("   "));
        assert!(!is_non_empty("\t\n"));
    }

    #[test]
    fn email_accepts_permissive_shapes() {
        assert!(is_email("user@example.com"));
        assert!(is_email("a@b.c"));
        assert!(is_email("first.last+tag@sub.example.co"));
        // Loose on purpose: these are not deliverable but pass the shape check
        assert!(is_email("user@localhost.x"));
        assert!(is_email("!#$%@weird.tld"));
    }

    #[test]
    fn email_requires_exactly_one_at_and_a_dot_after_it() {
        assert!(!is_email("no-at-sign.com"));
        assert!(!is_email("two@@example.com"));
        assert!(!is_email("a@b@c.d"));
        assert!(!is_email("user@nodot"));
        assert!(!is_email("user@.com"));
        assert!(!is_email("has space@example.com"));
        assert!(!is_email(""));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn sanitize_trims_whitespace() {
        assert_eq!(sanitize(" a "), "a");
        assert_eq!(sanitize("a"), "a");
        assert_eq!(sanitize("  "), "");
    }

    #[test]
    fn sanitize_optional_drops_blank_values() {
        assert_eq!(sanitize_optional(Some(" a ")), Some("a".to_string()));
        assert_eq!(sanitize_optional(Some("   ")), None);
        assert_eq!(sanitize_optional(Some("")), None);
        assert_eq!(sanitize_optional(None), None);
    }
}
