use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::normalize_optional;
use crate::domain::project::Project;
use crate::domain::types::{DeliveryId, DeliveryStatus, ProjectId, timestamp};

/// Client-facing delivery belonging to a project.
///
/// The backend either embeds the project or only sends `project_id`; both
/// shapes are accepted and [`Delivery::project_id`] resolves either.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    pub id: DeliveryId,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default, rename = "project_id")]
    pub project_ref: Option<ProjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: DeliveryStatus,
    #[serde(default = "default_version")]
    pub version: i32,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub delivered_at: Option<NaiveDateTime>,
}

fn default_version() -> i32 {
    1
}

impl Delivery {
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project.as_ref().map(|p| p.id).or(self.project_ref)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }
}

/// Payload for `POST /api/deliveries`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewDelivery {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
}

impl NewDelivery {
    #[must_use]
    pub fn new(project_id: ProjectId, title: String, description: Option<String>) -> Self {
        Self {
            project_id,
            title: title.trim().to_string(),
            description: normalize_optional(description),
        }
    }
}
