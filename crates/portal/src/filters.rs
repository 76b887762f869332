//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an ISO date (`2026-08-31`) as a short human date (`31 Aug 2026`).
///
/// Values that do not parse are passed through unchanged.
///
/// Usage in templates: `{{ record.work_date|short_date }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn short_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw
        .parse::<NaiveDate>()
        .map_or(raw, |date| date.format("%-d %b %Y").to_string()))
}
