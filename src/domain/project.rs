use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::normalize_optional;
use crate::domain::types::{ClientId, ProjectId, timestamp};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    /// Free-text client name used by older backend versions.
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Project {
    /// Client label for cards, or `None` when no client is attached.
    pub fn client_label(&self) -> Option<String> {
        match &self.client {
            Some(client) => Some(client.display_name().to_string()),
            None => self.client_name.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Payload for `POST /api/projects`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
}

impl NewProject {
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        client_id: Option<ClientId>,
        client_email: Option<String>,
    ) -> Self {
        let client_email = if client_id.is_some() {
            None
        } else {
            normalize_optional(client_email).map(|s| s.to_lowercase())
        };
        Self {
            name: name.trim().to_string(),
            description: normalize_optional(description),
            client_id,
            client_email,
        }
    }
}
