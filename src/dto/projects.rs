use serde::{Deserialize, Serialize};

use crate::api::ProjectListQuery;
use crate::domain::client::Client;
use crate::domain::delivery::Delivery;
use crate::domain::project::Project;
use crate::dto::{encode_filters, text_filter};
use crate::pagination::Paginated;

/// Query string of the projects list page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<usize>,
}

impl ProjectFilters {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn to_list_query(&self, per_page: usize) -> ProjectListQuery {
        let mut query = ProjectListQuery::new().paginate(self.page(), per_page);
        if let Some(term) = text_filter(self.q.as_deref()) {
            query = query.search(term);
        }
        if let Some(client) = text_filter(self.client.as_deref()) {
            query = query.client_email(client);
        }
        query
    }

    pub fn normalized(&self) -> Self {
        Self {
            q: text_filter(self.q.as_deref()),
            client: text_filter(self.client.as_deref()),
            page: None,
        }
    }

    pub fn query_string(&self) -> String {
        encode_filters(&self.normalized())
    }
}

/// Data required to render the projects list.
pub struct ProjectsPageData {
    pub projects: Paginated<Project>,
    pub filters: ProjectFilters,
    pub filter_query: String,
    /// Pick list for the create form; empty when the user cannot create.
    pub clients: Vec<Client>,
    pub can_create: bool,
}

/// Query string of the project detail page.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPageQuery {
    pub page: Option<usize>,
}

/// Data required to render a single project with its deliveries.
pub struct ProjectPageData {
    pub project: Project,
    pub deliveries: Paginated<Delivery>,
    pub can_add_delivery: bool,
}
