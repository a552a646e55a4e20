//! reqwest implementation of the backend traits.

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, ApiResult, error_message};
use crate::api::{
    AuthApi, ClientListQuery, ClientReader, DashboardReader, DeliveryListQuery, DeliveryReader,
    DeliveryWriter, FileReader, FileWriter, NceListQuery, NceReader, NceWriter, NotificationReader,
    NotificationWriter, ProjectListQuery, ProjectReader, ProjectWriter, SurveyListQuery,
    SurveyReader, SurveyWriter,
};
use crate::domain::client::Client;
use crate::domain::dashboard::{Activity, DashboardStats};
use crate::domain::delivery::{Delivery, NewDelivery};
use crate::domain::file::{FileDownload, FileItem, UploadFile, filename_from_disposition};
use crate::domain::nce::{NewNce, Nce, NceUpdate};
use crate::domain::notification::Notification;
use crate::domain::project::{NewProject, Project};
use crate::domain::survey::{NewSurvey, Survey};
use crate::domain::types::{DeliveryId, DeliveryStatus, FileId, NceId, NotificationId, ProjectId};
use crate::domain::user::{Credentials, NewUser, TokenResponse};

/// List payload as returned by the backend.
///
/// Older endpoints answer with a bare array; paginated ones wrap the page in
/// an envelope carrying the total count.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Paged {
        #[serde(
            alias = "clients",
            alias = "projects",
            alias = "deliveries",
            alias = "nces",
            alias = "surveys"
        )]
        items: Vec<T>,
        total: usize,
    },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_parts(self) -> (usize, Vec<T>) {
        match self {
            ListEnvelope::Paged { items, total } => (total, items),
            ListEnvelope::Bare(items) => (items.len(), items),
        }
    }
}

/// HTTP client for the quality-tracking backend.
///
/// The underlying connection pool is shared between clones; use
/// [`BackendClient::authorized`] to obtain a handle that sends a user's
/// bearer token.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quality-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Returns a handle that authenticates with `token`.
    pub fn authorized(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-2xx statuses into [`ApiError`].
    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("Request failed");
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, reason);
        log::warn!("Backend answered {status}: {message}");
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::send(builder).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_list<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<(usize, Vec<T>)> {
        let envelope: ListEnvelope<T> = Self::send_json(builder).await?;
        Ok(envelope.into_parts())
    }

    async fn send_empty(builder: RequestBuilder) -> ApiResult<()> {
        Self::send(builder).await?;
        Ok(())
    }

    async fn send_optional<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<Option<T>> {
        match Self::send_json(builder).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn download(builder: RequestBuilder) -> ApiResult<FileDownload> {
        let response = Self::send(builder).await?;
        let header = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value: &reqwest::header::HeaderValue| value.to_str().ok())
                .map(str::to_string)
        };
        let filename = header(CONTENT_DISPOSITION).and_then(|v| filename_from_disposition(&v));
        let content_type = header(CONTENT_TYPE);
        let bytes = response.bytes().await?.to_vec();

        Ok(FileDownload {
            filename,
            content_type,
            bytes,
        })
    }

    fn multipart(files: Vec<UploadFile>) -> ApiResult<Form> {
        let mut form = Form::new();
        for file in files {
            let mut part = Part::bytes(file.bytes).file_name(file.filename);
            if let Some(content_type) = file.content_type.as_deref() {
                part = part.mime_str(content_type)?;
            }
            form = form.part("files", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        Self::send_json(self.request(Method::POST, "/api/auth/login").json(credentials)).await
    }

    async fn register(&self, new_user: &NewUser) -> ApiResult<TokenResponse> {
        Self::send_json(self.request(Method::POST, "/api/auth/register").json(new_user)).await
    }
}

#[async_trait]
impl ClientReader for BackendClient {
    async fn list_clients(&self, query: ClientListQuery) -> ApiResult<(usize, Vec<Client>)> {
        Self::send_list(
            self.request(Method::GET, "/api/clients")
                .query(&query.to_query_pairs()),
        )
        .await
    }
}

#[async_trait]
impl ProjectReader for BackendClient {
    async fn list_projects(&self, query: ProjectListQuery) -> ApiResult<(usize, Vec<Project>)> {
        Self::send_list(
            self.request(Method::GET, "/api/projects")
                .query(&query.to_query_pairs()),
        )
        .await
    }

    async fn get_project(&self, id: ProjectId) -> ApiResult<Option<Project>> {
        Self::send_optional(self.request(Method::GET, &format!("/api/projects/{id}"))).await
    }
}

#[async_trait]
impl ProjectWriter for BackendClient {
    async fn create_project(&self, new_project: &NewProject) -> ApiResult<Project> {
        Self::send_json(self.request(Method::POST, "/api/projects").json(new_project)).await
    }
}

#[async_trait]
impl DeliveryReader for BackendClient {
    async fn list_deliveries(&self, query: DeliveryListQuery) -> ApiResult<(usize, Vec<Delivery>)> {
        Self::send_list(
            self.request(Method::GET, "/api/deliveries")
                .query(&query.to_query_pairs()),
        )
        .await
    }

    async fn get_delivery(&self, id: DeliveryId) -> ApiResult<Option<Delivery>> {
        Self::send_optional(self.request(Method::GET, &format!("/api/deliveries/{id}"))).await
    }
}

#[async_trait]
impl DeliveryWriter for BackendClient {
    async fn create_delivery(&self, new_delivery: &NewDelivery) -> ApiResult<Delivery> {
        Self::send_json(
            self.request(Method::POST, "/api/deliveries")
                .json(new_delivery),
        )
        .await
    }

    async fn update_delivery_status(
        &self,
        id: DeliveryId,
        status: DeliveryStatus,
    ) -> ApiResult<Delivery> {
        Self::send_json(
            self.request(Method::PUT, &format!("/api/deliveries/{id}/status"))
                .query(&[("status", status.as_str())]),
        )
        .await
    }
}

#[async_trait]
impl NceReader for BackendClient {
    async fn list_nces(&self, query: NceListQuery) -> ApiResult<(usize, Vec<Nce>)> {
        Self::send_list(
            self.request(Method::GET, "/api/nces")
                .query(&query.to_query_pairs()),
        )
        .await
    }

    async fn get_nce(&self, id: NceId) -> ApiResult<Option<Nce>> {
        Self::send_optional(self.request(Method::GET, &format!("/api/nces/{id}"))).await
    }
}

#[async_trait]
impl NceWriter for BackendClient {
    async fn create_nce(&self, new_nce: &NewNce) -> ApiResult<Nce> {
        Self::send_json(self.request(Method::POST, "/api/nces").json(new_nce)).await
    }

    async fn update_nce(&self, id: NceId, update: &NceUpdate) -> ApiResult<Nce> {
        Self::send_json(
            self.request(Method::PATCH, &format!("/api/nces/{id}"))
                .json(update),
        )
        .await
    }
}

#[async_trait]
impl SurveyReader for BackendClient {
    async fn list_surveys(&self, query: SurveyListQuery) -> ApiResult<(usize, Vec<Survey>)> {
        Self::send_list(
            self.request(Method::GET, "/api/surveys")
                .query(&query.to_query_pairs()),
        )
        .await
    }
}

#[async_trait]
impl SurveyWriter for BackendClient {
    async fn create_survey(&self, new_survey: &NewSurvey) -> ApiResult<Survey> {
        Self::send_json(self.request(Method::POST, "/api/surveys").json(new_survey)).await
    }
}

#[async_trait]
impl FileReader for BackendClient {
    async fn list_delivery_files(&self, delivery_id: DeliveryId) -> ApiResult<Vec<FileItem>> {
        Self::send_json(self.request(
            Method::GET,
            &format!("/api/deliveries/{delivery_id}/files/"),
        ))
        .await
    }

    async fn download_delivery_file(
        &self,
        delivery_id: DeliveryId,
        file_id: FileId,
    ) -> ApiResult<FileDownload> {
        Self::download(self.request(
            Method::GET,
            &format!("/api/deliveries/{delivery_id}/files/{file_id}/download"),
        ))
        .await
    }

    async fn download_nce_file(&self, nce_id: NceId, file_id: FileId) -> ApiResult<FileDownload> {
        Self::download(self.request(
            Method::GET,
            &format!("/api/nces/{nce_id}/files/{file_id}/download"),
        ))
        .await
    }
}

#[async_trait]
impl FileWriter for BackendClient {
    async fn upload_delivery_files(
        &self,
        delivery_id: DeliveryId,
        files: Vec<UploadFile>,
    ) -> ApiResult<Vec<FileItem>> {
        let form = Self::multipart(files)?;
        Self::send_json(
            self.request(
                Method::POST,
                &format!("/api/deliveries/{delivery_id}/files/"),
            )
            .multipart(form),
        )
        .await
    }

    async fn delete_delivery_file(
        &self,
        delivery_id: DeliveryId,
        file_id: FileId,
    ) -> ApiResult<()> {
        Self::send_empty(self.request(
            Method::DELETE,
            &format!("/api/deliveries/{delivery_id}/files/{file_id}"),
        ))
        .await
    }

    async fn upload_nce_files(
        &self,
        nce_id: NceId,
        files: Vec<UploadFile>,
    ) -> ApiResult<Vec<FileItem>> {
        let form = Self::multipart(files)?;
        Self::send_json(
            self.request(Method::POST, &format!("/api/nces/{nce_id}/files/"))
                .multipart(form),
        )
        .await
    }
}

#[async_trait]
impl DashboardReader for BackendClient {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        Self::send_json(self.request(Method::GET, "/api/dashboard/stats")).await
    }

    async fn recent_activity(&self, limit: usize) -> ApiResult<Vec<Activity>> {
        Self::send_json(
            self.request(Method::GET, "/api/dashboard/activities")
                .query(&[("limit", limit)]),
        )
        .await
    }
}

#[async_trait]
impl NotificationReader for BackendClient {
    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        Self::send_json(self.request(Method::GET, "/api/notifications")).await
    }
}

#[async_trait]
impl NotificationWriter for BackendClient {
    async fn mark_notification_read(&self, id: NotificationId) -> ApiResult<()> {
        Self::send_empty(self.request(
            Method::PATCH,
            &format!("/api/notifications/{id}/read"),
        ))
        .await
    }
}
