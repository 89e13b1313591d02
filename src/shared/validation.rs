use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};
use crate::shared::constants::CLIENT_USERNAME_PREFIX;

lazy_static! {
    /// Client account handle after normalization (lowercase, underscores for spaces)
    /// - Valid: "acme", "acme_corp", "client2"
    /// - Invalid: "", "Acme", "acme-corp", "acme corp", "_acme"
    pub static ref CLIENT_HANDLE_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();

    /// Employee names on the attendance sheet: letters (accents included), spaces,
    /// apostrophes, dots and hyphens
    pub static ref EMPLOYEE_NAME_REGEX: Regex = Regex::new(r"^[\p{L}][\p{L} .'\-]*$").unwrap();

    /// Time of day at minute precision (`HH:MM`, 24h)
    /// - Valid: "07:30", "23:59", "00:00"
    /// - Invalid: "7:30", "24:00", "07:60", "07:30:00"
    pub static ref TIME_OF_DAY_REGEX: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

/// Normalize an optional `HH:MM` time field. Blank values become `None`.
pub fn normalize_time(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if TIME_OF_DAY_REGEX.is_match(&v) => Ok(Some(v)),
        Some(v) => Err(AppError::Validation(format!(
            "{} must be HH:MM, got '{}'",
            field, v
        ))),
    }
}

/// Normalize a requested client name into its handle: lowercase, runs of
/// whitespace replaced by a single underscore.
pub fn client_handle(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Full username stored for a client account (`client_<handle>`)
pub fn client_username(name: &str) -> String {
    format!("{}{}", CLIENT_USERNAME_PREFIX, client_handle(name))
}

/// Display company name derived from a client handle: underscores become
/// spaces, everything uppercased.
pub fn client_display_name(handle: &str) -> String {
    handle
        .trim_start_matches(CLIENT_USERNAME_PREFIX)
        .replace('_', " ")
        .to_uppercase()
}
