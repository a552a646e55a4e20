//! Access to the external quality-tracking backend.
//!
//! Each backend collection is split into reader and writer traits so services
//! can declare exactly what they touch. [`BackendClient`] implements all of
//! them over HTTP; `mock::MockBackend` implements them for tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::errors::ApiResult;
use crate::domain::client::Client;
use crate::domain::dashboard::{Activity, DashboardStats};
use crate::domain::delivery::{Delivery, NewDelivery};
use crate::domain::file::{FileDownload, FileItem, UploadFile};
use crate::domain::nce::{NewNce, Nce, NceUpdate};
use crate::domain::notification::Notification;
use crate::domain::project::{NewProject, Project};
use crate::domain::survey::{NewSurvey, Survey};
use crate::domain::types::{
    DeliveryId, DeliveryStatus, FileId, NceId, NceSeverity, NceStatus, NotificationId, ProjectId,
    SortOrder, SurveyType,
};
use crate::domain::user::{Credentials, NewUser, TokenResponse};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::BackendClient;

/// Query parameter pairs sent to a list endpoint.
pub type QueryPairs = Vec<(&'static str, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of records to skip before this page, saturating for absurd
    /// page numbers taken from the query string.
    pub fn skip(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }

    fn push_pairs(&self, pairs: &mut QueryPairs) {
        pairs.push(("skip", self.skip().to_string()));
        pairs.push(("limit", self.per_page.to_string()));
    }
}

/// Inclusive creation-date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Builds a window, swapping the bounds when they are reversed.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) if from > to => Self {
                from: Some(to),
                to: Some(from),
            },
            _ => Self { from, to },
        }
    }

    fn push_pairs(&self, pairs: &mut QueryPairs) {
        if let Some(from) = self.from {
            pairs.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
    }
}

fn push_text(pairs: &mut QueryPairs, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectListQuery {
    pub search: Option<String>,
    pub client_email: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProjectListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = Some(email.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        push_text(&mut pairs, "search", &self.search);
        push_text(&mut pairs, "client_email", &self.client_email);
        if let Some(pagination) = &self.pagination {
            pagination.push_pairs(&mut pairs);
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryListQuery {
    pub search: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub project_id: Option<ProjectId>,
    pub project_name: Option<String>,
    pub client_email: Option<String>,
    pub dates: DateRange,
    pub sort: SortOrder,
    pub pagination: Option<Pagination>,
}

impl DeliveryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = Some(email.into());
        self
    }

    pub fn dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        push_text(&mut pairs, "search", &self.search);
        if let Some(status) = self.status {
            pairs.push(("status_filter", status.as_str().to_string()));
        }
        if let Some(project_id) = self.project_id {
            pairs.push(("project_id", project_id.to_string()));
        }
        push_text(&mut pairs, "project_name", &self.project_name);
        push_text(&mut pairs, "client_email", &self.client_email);
        self.dates.push_pairs(&mut pairs);
        pairs.push(("sort_order", self.sort.as_str().to_string()));
        if let Some(pagination) = &self.pagination {
            pagination.push_pairs(&mut pairs);
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NceListQuery {
    pub search: Option<String>,
    pub status: Option<NceStatus>,
    pub severity: Option<NceSeverity>,
    pub delivery_id: Option<DeliveryId>,
    pub project_name: Option<String>,
    pub dates: DateRange,
    pub sort: SortOrder,
    pub pagination: Option<Pagination>,
}

impl NceListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: NceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn severity(mut self, severity: NceSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn delivery(mut self, delivery_id: DeliveryId) -> Self {
        self.delivery_id = Some(delivery_id);
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        push_text(&mut pairs, "search", &self.search);
        if let Some(status) = self.status {
            pairs.push(("status_filter", status.as_str().to_string()));
        }
        if let Some(severity) = self.severity {
            pairs.push(("severity_filter", severity.as_str().to_string()));
        }
        if let Some(delivery_id) = self.delivery_id {
            pairs.push(("delivery_id", delivery_id.to_string()));
        }
        push_text(&mut pairs, "project_name", &self.project_name);
        self.dates.push_pairs(&mut pairs);
        pairs.push(("sort_order", self.sort.as_str().to_string()));
        if let Some(pagination) = &self.pagination {
            pagination.push_pairs(&mut pairs);
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyListQuery {
    pub survey_type: Option<SurveyType>,
    pub delivery_id: Option<DeliveryId>,
    pub pagination: Option<Pagination>,
}

impl SurveyListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn survey_type(mut self, survey_type: SurveyType) -> Self {
        self.survey_type = Some(survey_type);
        self
    }

    pub fn delivery(mut self, delivery_id: DeliveryId) -> Self {
        self.delivery_id = Some(delivery_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(survey_type) = self.survey_type {
            pairs.push(("survey_type", survey_type.as_str().to_string()));
        }
        if let Some(delivery_id) = self.delivery_id {
            pairs.push(("delivery_id", delivery_id.to_string()));
        }
        if let Some(pagination) = &self.pagination {
            pagination.push_pairs(&mut pairs);
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        push_text(&mut pairs, "search", &self.search);
        if let Some(pagination) = &self.pagination {
            pagination.push_pairs(&mut pairs);
        }
        pairs
    }
}

#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;
    async fn register(&self, new_user: &NewUser) -> ApiResult<TokenResponse>;
}

#[async_trait]
pub trait ClientReader {
    async fn list_clients(&self, query: ClientListQuery) -> ApiResult<(usize, Vec<Client>)>;
}

#[async_trait]
pub trait ProjectReader {
    async fn list_projects(&self, query: ProjectListQuery) -> ApiResult<(usize, Vec<Project>)>;
    async fn get_project(&self, id: ProjectId) -> ApiResult<Option<Project>>;
}

#[async_trait]
pub trait ProjectWriter {
    async fn create_project(&self, new_project: &NewProject) -> ApiResult<Project>;
}

#[async_trait]
pub trait DeliveryReader {
    async fn list_deliveries(&self, query: DeliveryListQuery) -> ApiResult<(usize, Vec<Delivery>)>;
    async fn get_delivery(&self, id: DeliveryId) -> ApiResult<Option<Delivery>>;
}

#[async_trait]
pub trait DeliveryWriter {
    async fn create_delivery(&self, new_delivery: &NewDelivery) -> ApiResult<Delivery>;
    async fn update_delivery_status(
        &self,
        id: DeliveryId,
        status: DeliveryStatus,
    ) -> ApiResult<Delivery>;
}

#[async_trait]
pub trait NceReader {
    async fn list_nces(&self, query: NceListQuery) -> ApiResult<(usize, Vec<Nce>)>;
    async fn get_nce(&self, id: NceId) -> ApiResult<Option<Nce>>;
}

#[async_trait]
pub trait NceWriter {
    async fn create_nce(&self, new_nce: &NewNce) -> ApiResult<Nce>;
    async fn update_nce(&self, id: NceId, update: &NceUpdate) -> ApiResult<Nce>;
}

#[async_trait]
pub trait SurveyReader {
    async fn list_surveys(&self, query: SurveyListQuery) -> ApiResult<(usize, Vec<Survey>)>;
}

#[async_trait]
pub trait SurveyWriter {
    async fn create_survey(&self, new_survey: &NewSurvey) -> ApiResult<Survey>;
}

#[async_trait]
pub trait FileReader {
    async fn list_delivery_files(&self, delivery_id: DeliveryId) -> ApiResult<Vec<FileItem>>;
    async fn download_delivery_file(
        &self,
        delivery_id: DeliveryId,
        file_id: FileId,
    ) -> ApiResult<FileDownload>;
    async fn download_nce_file(&self, nce_id: NceId, file_id: FileId) -> ApiResult<FileDownload>;
}

#[async_trait]
pub trait FileWriter {
    async fn upload_delivery_files(
        &self,
        delivery_id: DeliveryId,
        files: Vec<UploadFile>,
    ) -> ApiResult<Vec<FileItem>>;
    async fn delete_delivery_file(&self, delivery_id: DeliveryId, file_id: FileId) -> ApiResult<()>;
    async fn upload_nce_files(
        &self,
        nce_id: NceId,
        files: Vec<UploadFile>,
    ) -> ApiResult<Vec<FileItem>>;
}

#[async_trait]
pub trait DashboardReader {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
    async fn recent_activity(&self, limit: usize) -> ApiResult<Vec<Activity>>;
}

#[async_trait]
pub trait NotificationReader {
    async fn list_notifications(&self) -> ApiResult<Vec<Notification>>;
}

#[async_trait]
pub trait NotificationWriter {
    async fn mark_notification_read(&self, id: NotificationId) -> ApiResult<()>;
}
