//! DTOs exposed by the JSON API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::types::ProjectId;

/// Query parameters accepted by the lookup endpoints under `/api/v1`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    /// Optional fragment to filter by.
    #[serde(default, alias = "query")]
    pub search: Option<String>,
    /// Optional page number for pagination.
    #[serde(default)]
    pub page: Option<usize>,
}

impl LookupQuery {
    /// Trimmed search fragment, `None` when blank.
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Result payload returned by [`crate::services::api::list_clients`].
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    /// Total number of clients matching the filter.
    pub total: usize,
    /// Page of clients requested by the caller.
    pub clients: Vec<Client>,
}

/// Project entry offered by the project-name filter.
#[derive(Debug, Serialize, PartialEq)]
pub struct ProjectOption {
    pub id: ProjectId,
    pub name: String,
}

impl From<Project> for ProjectOption {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
        }
    }
}

/// Result payload returned by [`crate::services::api::list_project_names`].
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub total: usize,
    pub projects: Vec<ProjectOption>,
}
