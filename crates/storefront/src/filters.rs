//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash of the client script.
///
/// The hash is computed at build time and appended to the script URL so
/// browsers refetch it whenever it changes.
///
/// Usage in templates: `{{ ""|script_hash }}`
#[askama::filter_fn]
pub fn script_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("SCRIPT_HASH"))
}
