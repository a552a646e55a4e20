//! Records mirrored from the quality-tracking backend.

pub mod analytics;
pub mod client;
pub mod dashboard;
pub mod delivery;
pub mod file;
pub mod nce;
pub mod notification;
pub mod project;
pub mod survey;
pub mod types;
pub mod user;

/// Trims a free-form value and drops it when nothing is left.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
