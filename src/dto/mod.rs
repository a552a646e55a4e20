//! DTO modules that bridge services with templates and APIs.
//!
//! List pages receive their filters straight from the query string. Values
//! are kept as the raw strings the browser sent so the filter form can echo
//! them back; the helpers below turn them into typed backend parameters.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::SortOrder;

pub mod analytics;
pub mod api;
pub mod deliveries;
pub mod main;
pub mod nces;
pub mod projects;
pub mod surveys;

/// Trimmed text filter; blank becomes `None`.
pub(crate) fn text_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses a choice filter; blank and `all` mean "no filter".
pub(crate) fn choice_filter<T: FromStr>(value: Option<&str>, name: &str) -> Option<T> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring unknown {name} filter: {value}");
            None
        }
    }
}

/// Parses a `YYYY-MM-DD` date filter.
pub(crate) fn date_filter(value: Option<&str>, name: &str) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            log::warn!("Ignoring invalid {name} filter: {value}");
            None
        }
    }
}

pub(crate) fn sort_filter(value: Option<&str>) -> SortOrder {
    choice_filter(value, "sort").unwrap_or_default()
}

/// Encodes active filters for pagination links.
pub(crate) fn encode_filters<T: Serialize>(filters: &T) -> String {
    serde_html_form::to_string(filters).unwrap_or_else(|err| {
        log::error!("Failed to encode filters: {err}");
        String::new()
    })
}
