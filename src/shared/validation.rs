use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Instagram handle without the leading `@`
    /// - Valid: "jane.doe", "studio_22", "a"
    /// - Invalid: "@jane", "jane doe", "jane..doe", ".jane"
    pub static ref INSTAGRAM_HANDLE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_](?:[A-Za-z0-9_]|\.(?:[A-Za-z0-9_])){0,29}$").unwrap();

    /// Loose international phone number: optional `+`, digits, spaces and dashes
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap();
}

/// Reject values that are empty once surrounding whitespace is trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Must not be blank".into()));
    }
    Ok(())
}

/// Remove duplicates while keeping the first occurrence of each value in place
pub fn dedup_preserving_order<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
