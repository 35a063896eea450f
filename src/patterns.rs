//! Pattern-based contact detection over free text.

use regex::Regex;
use std::sync::LazyLock;

/// A token with non-space characters on both sides of an `@`
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid regex"));

/// A 10 to 17 character digit run, spaces and hyphens allowed inside, optional leading `+`
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d -]{8,15}\d").expect("valid regex"));

/// First email-like match in `text`
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// First phone-like match in `text`
pub fn find_phone(text: &str) -> Option<&str> {
    PHONE_RE.find(text).map(|m| m.as_str())
}

/// Every email-like match in `text`, in order
pub fn find_all_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every phone-like match in `text`, in order
pub fn find_all_phones(text: &str) -> Vec<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
