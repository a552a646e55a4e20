//! Mock backend implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{
    AuthApi, ClientListQuery, ClientReader, DashboardReader, DeliveryListQuery, DeliveryReader,
    DeliveryWriter, FileReader, FileWriter, NceListQuery, NceReader, NceWriter, NotificationReader,
    NotificationWriter, ProjectListQuery, ProjectReader, ProjectWriter, SurveyListQuery,
    SurveyReader, SurveyWriter,
};
use crate::domain::client::Client;
use crate::domain::dashboard::{Activity, DashboardStats};
use crate::domain::delivery::{Delivery, NewDelivery};
use crate::domain::file::{FileDownload, FileItem, UploadFile};
use crate::domain::nce::{NewNce, Nce, NceUpdate};
use crate::domain::notification::Notification;
use crate::domain::project::{NewProject, Project};
use crate::domain::survey::{NewSurvey, Survey};
use crate::domain::types::{DeliveryId, DeliveryStatus, FileId, NceId, NotificationId, ProjectId};
use crate::domain::user::{Credentials, NewUser, TokenResponse};

mock! {
    pub Backend {}

    #[async_trait]
    impl AuthApi for Backend {
        async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;
        async fn register(&self, new_user: &NewUser) -> ApiResult<TokenResponse>;
    }

    #[async_trait]
    impl ClientReader for Backend {
        async fn list_clients(&self, query: ClientListQuery) -> ApiResult<(usize, Vec<Client>)>;
    }

    #[async_trait]
    impl ProjectReader for Backend {
        async fn list_projects(&self, query: ProjectListQuery) -> ApiResult<(usize, Vec<Project>)>;
        async fn get_project(&self, id: ProjectId) -> ApiResult<Option<Project>>;
    }

    #[async_trait]
    impl ProjectWriter for Backend {
        async fn create_project(&self, new_project: &NewProject) -> ApiResult<Project>;
    }

    #[async_trait]
    impl DeliveryReader for Backend {
        async fn list_deliveries(
            &self,
            query: DeliveryListQuery,
        ) -> ApiResult<(usize, Vec<Delivery>)>;
        async fn get_delivery(&self, id: DeliveryId) -> ApiResult<Option<Delivery>>;
    }

    #[async_trait]
    impl DeliveryWriter for Backend {
        async fn create_delivery(&self, new_delivery: &NewDelivery) -> ApiResult<Delivery>;
        async fn update_delivery_status(
            &self,
            id: DeliveryId,
            status: DeliveryStatus,
        ) -> ApiResult<Delivery>;
    }

    #[async_trait]
    impl NceReader for Backend {
        async fn list_nces(&self, query: NceListQuery) -> ApiResult<(usize, Vec<Nce>)>;
        async fn get_nce(&self, id: NceId) -> ApiResult<Option<Nce>>;
    }

    #[async_trait]
    impl NceWriter for Backend {
        async fn create_nce(&self, new_nce: &NewNce) -> ApiResult<Nce>;
        async fn update_nce(&self, id: NceId, update: &NceUpdate) -> ApiResult<Nce>;
    }

    #[async_trait]
    impl SurveyReader for Backend {
        async fn list_surveys(&self, query: SurveyListQuery) -> ApiResult<(usize, Vec<Survey>)>;
    }

    #[async_trait]
    impl SurveyWriter for Backend {
        async fn create_survey(&self, new_survey: &NewSurvey) -> ApiResult<Survey>;
    }

    #[async_trait]
    impl FileReader for Backend {
        async fn list_delivery_files(&self, delivery_id: DeliveryId) -> ApiResult<Vec<FileItem>>;
        async fn download_delivery_file(
            &self,
            delivery_id: DeliveryId,
            file_id: FileId,
        ) -> ApiResult<FileDownload>;
        async fn download_nce_file(
            &self,
            nce_id: NceId,
            file_id: FileId,
        ) -> ApiResult<FileDownload>;
    }

    #[async_trait]
    impl FileWriter for Backend {
        async fn upload_delivery_files(
            &self,
            delivery_id: DeliveryId,
            files: Vec<UploadFile>,
        ) -> ApiResult<Vec<FileItem>>;
        async fn delete_delivery_file(
            &self,
            delivery_id: DeliveryId,
            file_id: FileId,
        ) -> ApiResult<()>;
        async fn upload_nce_files(
            &self,
            nce_id: NceId,
            files: Vec<UploadFile>,
        ) -> ApiResult<Vec<FileItem>>;
    }

    #[async_trait]
    impl DashboardReader for Backend {
        async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
        async fn recent_activity(&self, limit: usize) -> ApiResult<Vec<Activity>>;
    }

    #[async_trait]
    impl NotificationReader for Backend {
        async fn list_notifications(&self) -> ApiResult<Vec<Notification>>;
    }

    #[async_trait]
    impl NotificationWriter for Backend {
        async fn mark_notification_read(&self, id: NotificationId) -> ApiResult<()>;
    }
}
