use crate::domain::DomainError;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| panic!("email regex failed to compile: {e}"))
});

pub const MAX_PAGE_SIZE: i64 = 100;

/// Which operation a user form is being checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationContext {
    #[default]
    Create,
    Update,
    Login,
}

/// Trims the value and escapes HTML-significant characters.
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&#34;")
        .replace('\'', "&#39;")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn require(value: &str, message: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(())
}

pub fn require_id(value: Option<i64>, message: &str) -> Result<i64, DomainError> {
    match value {
        Some(id) if id >= 1 => Ok(id),
        _ => Err(DomainError::Validation(message.to_string())),
    }
}

pub fn require_email(email: &str) -> Result<(), DomainError> {
    require(email, "Required Email")?;
    if !is_valid_email(email) {
        return Err(DomainError::Validation("Invalid Email".to_string()));
    }
    Ok(())
}

/// Reads an optional id from form text. A blank value counts as absent, so
/// `require_id` reports the missing field instead of a parse failure.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Resolves optional `limit`/`offset` query values into a bounded page.
pub fn page(limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64), DomainError> {
    let limit = limit.unwrap_or(MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0);

    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(DomainError::Validation(format!(
            "Limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    if offset < 0 {
        return Err(DomainError::Validation(
            "Offset cannot be negative".to_string(),
        ));
    }

    Ok((limit, offset))
}
