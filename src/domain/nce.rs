use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::delivery::Delivery;
use crate::domain::file::FileItem;
use crate::domain::normalize_optional;
use crate::domain::types::{DeliveryId, NceId, NceSeverity, NceStatus, timestamp};

/// Non-conformity recorded against a delivery.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Nce {
    pub id: NceId,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default, rename = "delivery_id")]
    pub delivery_ref: Option<DeliveryId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: NceSeverity,
    pub status: NceStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub resolved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub files: Vec<FileItem>,
}

impl Nce {
    pub fn delivery_id(&self) -> Option<DeliveryId> {
        self.delivery.as_ref().map(|d| d.id).or(self.delivery_ref)
    }
}

/// Payload for `POST /api/nces`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewNce {
    pub delivery_id: DeliveryId,
    pub title: String,
    pub description: String,
    pub severity: NceSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewNce {
    #[must_use]
    pub fn new(
        delivery_id: DeliveryId,
        title: String,
        description: String,
        severity: NceSeverity,
        category: Option<String>,
    ) -> Self {
        Self {
            delivery_id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            severity,
            category: normalize_optional(category),
        }
    }
}

/// Partial update sent with `PATCH /api/nces/{id}`.
///
/// The detail page changes one field per submission; absent fields are not
/// serialized so the backend leaves them untouched.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct NceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<NceSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NceUpdate {
    pub fn status(status: NceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn severity(severity: NceSeverity) -> Self {
        Self {
            severity: Some(severity),
            ..Self::default()
        }
    }

    /// Category change; an empty value clears the category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into().trim().to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.severity.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_only_the_changed_field() {
        let json = serde_json::to_value(NceUpdate::status(NceStatus::Resolved)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "resolved"}));

        let json = serde_json::to_value(NceUpdate::category("  Packaging ")).unwrap();
        assert_eq!(json, serde_json::json!({"category": "Packaging"}));

        assert!(NceUpdate::default().is_empty());
    }

    #[test]
    fn decodes_backend_shape_with_defaults() {
        let nce: Nce = serde_json::from_str(
            r#"{"id": 1, "delivery_id": 4, "title": "Broken seal", "description": "Seal torn",
                "severity": "critical", "status": "open", "created_at": "2024-02-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(nce.delivery_id(), DeliveryId::new(4).ok());
        assert_eq!(nce.severity, NceSeverity::Critical);
        assert!(nce.files.is_empty());
        assert_eq!(nce.category, None);
    }
}
