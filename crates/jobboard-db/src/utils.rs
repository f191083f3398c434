//! Shared utility functions

use chrono::{DateTime, Utc};

/// Parse a datetime string (RFC3339 format) or return current time
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Normalize an email address for storage and lookup.
///
/// Emails are unique case-insensitively, so every address is trimmed and
/// lower-cased before it touches the database.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`
/// pattern.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_or_now() {
        let valid_time = "2024-01-01T12:00:00Z";
        let parsed = parse_datetime_or_now(valid_time);
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T12:00:00+00:00");

        // Invalid time should return current time (just check it doesn't panic)
        let now_before = Utc::now();
        let parsed = parse_datetime_or_now("invalid");
        let now_after = Utc::now();
        assert!(parsed >= now_before && parsed <= now_after);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("react"), "react");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
