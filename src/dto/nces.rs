use serde::{Deserialize, Serialize};

use crate::api::{DateRange, NceListQuery};
use crate::domain::analytics::Bucket;
use crate::domain::delivery::Delivery;
use crate::domain::nce::Nce;
use crate::domain::types::{NceSeverity, NceStatus};
use crate::dto::{choice_filter, date_filter, encode_filters, sort_filter, text_filter};
use crate::pagination::Paginated;

/// Query string of the non-conformity list page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct NceFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<usize>,
}

impl NceFilters {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    fn dates(&self) -> DateRange {
        DateRange::new(
            date_filter(self.date_from.as_deref(), "date_from"),
            date_filter(self.date_to.as_deref(), "date_to"),
        )
    }

    pub fn to_list_query(&self, per_page: usize) -> NceListQuery {
        let mut query = NceListQuery::new()
            .dates(self.dates())
            .sort(sort_filter(self.sort.as_deref()))
            .paginate(self.page(), per_page);

        if let Some(term) = text_filter(self.q.as_deref()) {
            query = query.search(term);
        }
        if let Some(status) = choice_filter::<NceStatus>(self.status.as_deref(), "status") {
            query = query.status(status);
        }
        if let Some(severity) = choice_filter::<NceSeverity>(self.severity.as_deref(), "severity")
        {
            query = query.severity(severity);
        }
        if let Some(project) = text_filter(self.project.as_deref()) {
            query = query.project_name(project);
        }
        query
    }

    pub fn normalized(&self) -> Self {
        let dates = self.dates();
        Self {
            q: text_filter(self.q.as_deref()),
            status: choice_filter::<NceStatus>(self.status.as_deref(), "status")
                .map(|s| s.as_str().to_string()),
            severity: choice_filter::<NceSeverity>(self.severity.as_deref(), "severity")
                .map(|s| s.as_str().to_string()),
            project: text_filter(self.project.as_deref()),
            date_from: dates.from.map(|d| d.format("%Y-%m-%d").to_string()),
            date_to: dates.to.map(|d| d.format("%Y-%m-%d").to_string()),
            sort: text_filter(self.sort.as_deref())
                .map(|_| sort_filter(self.sort.as_deref()).as_str().to_string()),
            page: None,
        }
    }

    pub fn query_string(&self) -> String {
        encode_filters(&self.normalized())
    }
}

/// Data required to render the non-conformity list.
pub struct NcesPageData {
    pub nces: Paginated<Nce>,
    pub filters: NceFilters,
    pub filter_query: String,
    /// Counts over the fetched page.
    pub status_counts: Vec<Bucket>,
    pub severity_counts: Vec<Bucket>,
    /// Pick list for the report form.
    pub deliveries: Vec<Delivery>,
}

/// Data required to render a single non-conformity.
pub struct NcePageData {
    pub nce: Nce,
    pub delivery: Option<Delivery>,
    pub can_review: bool,
    pub can_edit: bool,
}

/// Outcome of reporting a non-conformity.
#[derive(Debug)]
pub struct NceCreated {
    pub nce: Nce,
    pub attached: usize,
    /// Set when the NCE was stored but its files could not be uploaded.
    pub upload_failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_and_severity_filters() {
        let filters = NceFilters {
            status: Some("In Progress".into()),
            severity: Some("critical".into()),
            project: Some(" Tower ".into()),
            ..NceFilters::default()
        };
        let pairs = filters.to_list_query(10).to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("status_filter", "in_progress".to_string()),
                ("severity_filter", "critical".to_string()),
                ("project_name", "Tower".to_string()),
                ("sort_order", "desc".to_string()),
                ("skip", "0".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn normalized_filters_use_wire_values() {
        let filters = NceFilters {
            status: Some("In Progress".into()),
            severity: Some("all".into()),
            sort: Some("ASC".into()),
            ..NceFilters::default()
        };
        assert_eq!(filters.query_string(), "status=in_progress&sort=asc");
    }
}
