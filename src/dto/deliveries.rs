use serde::{Deserialize, Serialize};

use crate::api::{DateRange, DeliveryListQuery};
use crate::domain::delivery::Delivery;
use crate::domain::file::FileItem;
use crate::domain::nce::Nce;
use crate::domain::project::Project;
use crate::domain::survey::Survey;
use crate::domain::types::DeliveryStatus;
use crate::dto::{choice_filter, date_filter, encode_filters, sort_filter, text_filter};
use crate::pagination::Paginated;

/// Query string of the deliveries list page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeliveryFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Project name substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Client email substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<usize>,
}

impl DeliveryFilters {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn to_list_query(&self, per_page: usize) -> DeliveryListQuery {
        let mut query = DeliveryListQuery::new()
            .dates(DateRange::new(
                date_filter(self.date_from.as_deref(), "date_from"),
                date_filter(self.date_to.as_deref(), "date_to"),
            ))
            .sort(sort_filter(self.sort.as_deref()))
            .paginate(self.page(), per_page);

        if let Some(term) = text_filter(self.q.as_deref()) {
            query = query.search(term);
        }
        if let Some(status) = choice_filter::<DeliveryStatus>(self.status.as_deref(), "status") {
            query = query.status(status);
        }
        if let Some(project) = text_filter(self.project.as_deref()) {
            query = query.project_name(project);
        }
        if let Some(client) = text_filter(self.client.as_deref()) {
            query = query.client_email(client);
        }
        query
    }

    /// Filters with blanks and unknown values dropped, as echoed to the page.
    pub fn normalized(&self) -> Self {
        let dates = DateRange::new(
            date_filter(self.date_from.as_deref(), "date_from"),
            date_filter(self.date_to.as_deref(), "date_to"),
        );
        Self {
            q: text_filter(self.q.as_deref()),
            status: choice_filter::<DeliveryStatus>(self.status.as_deref(), "status")
                .map(|s| s.as_str().to_string()),
            project: text_filter(self.project.as_deref()),
            client: text_filter(self.client.as_deref()),
            date_from: dates.from.map(|d| d.format("%Y-%m-%d").to_string()),
            date_to: dates.to.map(|d| d.format("%Y-%m-%d").to_string()),
            sort: text_filter(self.sort.as_deref())
                .map(|_| sort_filter(self.sort.as_deref()).as_str().to_string()),
            page: None,
        }
    }

    /// Active filters encoded for pagination links.
    pub fn query_string(&self) -> String {
        encode_filters(&self.normalized())
    }
}

/// Data required to render the deliveries list.
pub struct DeliveriesPageData {
    pub deliveries: Paginated<Delivery>,
    pub filters: DeliveryFilters,
    pub filter_query: String,
    /// Pick list for the create form; empty when the user cannot create.
    pub projects: Vec<Project>,
    pub can_create: bool,
}

/// Data required to render a single delivery.
pub struct DeliveryPageData {
    pub delivery: Delivery,
    pub project: Option<Project>,
    pub nces: Vec<Nce>,
    pub surveys: Vec<Survey>,
    pub files: Vec<FileItem>,
    pub can_review: bool,
    pub can_upload: bool,
}
