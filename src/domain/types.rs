//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are positive integers issued by the backend. Enumerations
//! mirror the wire values of the backend API and know how to present
//! themselves as labels and badge classes.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Survey score outside of the 0–10 scale.
    #[error("score must be between 0 and 10")]
    ScoreOutOfRange,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a backend user.");
id_newtype!(ClientId, "Unique identifier for a client account.");
id_newtype!(ProjectId, "Unique identifier for a project.");
id_newtype!(DeliveryId, "Unique identifier for a delivery.");
id_newtype!(NceId, "Unique identifier for a non-conformity event.");
id_newtype!(SurveyId, "Unique identifier for a satisfaction survey.");
id_newtype!(FileId, "Unique identifier for an attached file.");
id_newtype!(NotificationId, "Unique identifier for a notification.");

/// Generates the shared string plumbing for wire enums.
///
/// Each variant lists its wire value, its human label, and any extra aliases
/// accepted when parsing.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal, $label:literal $(| $alias:literal)*;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value used on the wire and in query strings.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                match normalized.as_str() {
                    $($wire $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(TypeConstraintError::InvalidValue(s.to_string())),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

wire_enum! {
    /// Lifecycle of a delivery.
    DeliveryStatus {
        Draft => "draft", "Draft" | "pending";
        Delivered => "delivered", "Delivered";
        Approved => "approved", "Approved";
        Rejected => "rejected", "Rejected";
    }
}

wire_enum! {
    /// How serious a non-conformity is.
    NceSeverity {
        Low => "low", "Low";
        Medium => "medium", "Medium";
        Critical => "critical", "Critical";
    }
}

wire_enum! {
    /// Progress of a non-conformity towards resolution.
    NceStatus {
        Open => "open", "Open";
        InProgress => "in_progress", "In progress" | "in progress";
        Resolved => "resolved", "Resolved";
        Closed => "closed", "Closed";
    }
}

wire_enum! {
    /// Kind of satisfaction survey.
    SurveyType {
        Nps => "nps", "NPS";
        Csat => "csat", "CSAT";
    }
}

wire_enum! {
    /// Role assigned to a user by the backend.
    UserRole {
        Admin => "admin", "Administrator";
        Quality => "quality", "Quality";
        Producer => "producer", "Producer";
        Client => "client", "Client";
    }
}

wire_enum! {
    /// Ordering of list results by creation date.
    SortOrder {
        Desc => "desc", "Newest first";
        Asc => "asc", "Oldest first";
    }
}

impl DeliveryStatus {
    /// CSS modifier of the status badge.
    pub const fn badge_class(self) -> &'static str {
        match self {
            DeliveryStatus::Draft => "warning",
            DeliveryStatus::Delivered => "info",
            DeliveryStatus::Approved => "success",
            DeliveryStatus::Rejected => "danger",
        }
    }
}

impl NceSeverity {
    pub const fn badge_class(self) -> &'static str {
        match self {
            NceSeverity::Low => "info",
            NceSeverity::Medium => "warning",
            NceSeverity::Critical => "danger",
        }
    }
}

impl Default for NceSeverity {
    fn default() -> Self {
        NceSeverity::Medium
    }
}

impl NceStatus {
    pub const fn badge_class(self) -> &'static str {
        match self {
            NceStatus::Open => "danger",
            NceStatus::InProgress => "warning",
            NceStatus::Resolved | NceStatus::Closed => "success",
        }
    }

    /// Whether the non-conformity still needs work.
    pub const fn is_open(self) -> bool {
        matches!(self, NceStatus::Open | NceStatus::InProgress)
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Survey score on the 0–10 scale shared by NPS and CSAT.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct SurveyScore(u8);

impl SurveyScore {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::ScoreOutOfRange)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SurveyScore {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SurveyScore> for u8 {
    fn from(value: SurveyScore) -> Self {
        value.0
    }
}

impl Display for SurveyScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a backend timestamp.
///
/// Accepts naive ISO-8601 (`2024-05-01T10:00:00.123456`) as well as RFC 3339
/// with an offset, which is converted to UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TypeConstraintError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| TypeConstraintError::InvalidValue(value.to_string()))
}

/// Serde helpers for backend timestamps.
pub mod timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// Optional variant of the timestamp helpers.
    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.filter(|s| !s.trim().is_empty())
                .map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
                .transpose()
        }

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(DeliveryId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(NceId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ProjectId::new(7).map(ProjectId::get), Ok(7));
    }

    #[test]
    fn delivery_status_badges() {
        assert_eq!(DeliveryStatus::Draft.badge_class(), "warning");
        assert_eq!(DeliveryStatus::Delivered.badge_class(), "info");
        assert_eq!(DeliveryStatus::Approved.badge_class(), "success");
        assert_eq!(DeliveryStatus::Rejected.badge_class(), "danger");
    }

    #[test]
    fn nce_badges() {
        assert_eq!(NceSeverity::Low.badge_class(), "info");
        assert_eq!(NceSeverity::Medium.badge_class(), "warning");
        assert_eq!(NceSeverity::Critical.badge_class(), "danger");
        assert_eq!(NceStatus::Open.badge_class(), "danger");
        assert_eq!(NceStatus::InProgress.badge_class(), "warning");
        assert_eq!(NceStatus::Resolved.badge_class(), "success");
        assert_eq!(NceStatus::Closed.badge_class(), "success");
    }

    #[test]
    fn parses_wire_values_case_insensitively() {
        assert_eq!(" Approved ".parse(), Ok(DeliveryStatus::Approved));
        assert_eq!("pending".parse(), Ok(DeliveryStatus::Draft));
        assert_eq!("IN_PROGRESS".parse(), Ok(NceStatus::InProgress));
        assert_eq!("csat".parse(), Ok(SurveyType::Csat));
        assert!("shipped".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&NceStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let status: DeliveryStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, DeliveryStatus::Draft);
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(NceStatus::InProgress.label(), "In progress");
        assert_eq!(SurveyType::Nps.label(), "NPS");
    }

    #[test]
    fn survey_score_bounds() {
        assert!(SurveyScore::new(0).is_ok());
        assert!(SurveyScore::new(10).is_ok());
        assert_eq!(SurveyScore::new(11), Err(TypeConstraintError::ScoreOutOfRange));
        assert!(serde_json::from_str::<SurveyScore>("12").is_err());
    }

    #[test]
    fn timestamps_accept_naive_and_offset_forms() {
        let naive = parse_timestamp("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(naive.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 10:00");

        let offset = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(offset.format("%H:%M").to_string(), "10:00");

        assert!(parse_timestamp("yesterday").is_err());
    }
}
