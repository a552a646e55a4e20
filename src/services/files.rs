//! Delivery and non-conformity attachments.

use crate::api::{FileReader, FileWriter};
use crate::domain::file::{FileDownload, FileItem};
use crate::domain::types::{DeliveryId, FileId, NceId};
use crate::forms::deliveries::UploadFilesForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::AUTHOR_ROLES;

fn ids<A, B>(first: i32, second: i32) -> ServiceResult<(A, B)>
where
    A: TryFrom<i32>,
    B: TryFrom<i32>,
{
    match (A::try_from(first), B::try_from(second)) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(ServiceError::NotFound),
    }
}

/// Uploads the submitted files to a delivery.
pub async fn upload_delivery_files<R>(
    api: &R,
    user: &AuthenticatedUser,
    delivery_id: i32,
    form: UploadFilesForm,
) -> ServiceResult<Vec<FileItem>>
where
    R: FileWriter + ?Sized,
{
    ensure_role(user, AUTHOR_ROLES, "upload files")?;

    let delivery_id = DeliveryId::new(delivery_id).map_err(|_| ServiceError::NotFound)?;
    let uploads = form.into_uploads().map_err(|err| {
        log::error!("Failed to read uploaded files: {err}");
        err
    })?;

    let files = api
        .upload_delivery_files(delivery_id, uploads)
        .await
        .map_err(|err| {
            log::error!("Failed to upload files to delivery {delivery_id}: {err}");
            err
        })?;

    Ok(files)
}

/// Removes a file from a delivery.
pub async fn delete_delivery_file<R>(
    api: &R,
    user: &AuthenticatedUser,
    delivery_id: i32,
    file_id: i32,
) -> ServiceResult<()>
where
    R: FileWriter + ?Sized,
{
    ensure_role(user, AUTHOR_ROLES, "delete files")?;

    let (delivery_id, file_id) = ids::<DeliveryId, FileId>(delivery_id, file_id)?;
    api.delete_delivery_file(delivery_id, file_id)
        .await
        .map_err(|err| {
            log::error!("Failed to delete file {file_id} of delivery {delivery_id}: {err}");
            err
        })?;

    Ok(())
}

/// Downloads a delivery file.
///
/// When the backend response carries no filename, the name stored with the
/// file record is used.
pub async fn download_delivery_file<R>(
    api: &R,
    delivery_id: i32,
    file_id: i32,
) -> ServiceResult<FileDownload>
where
    R: FileReader + ?Sized,
{
    let (delivery_id, file_id) = ids::<DeliveryId, FileId>(delivery_id, file_id)?;

    let mut download = api
        .download_delivery_file(delivery_id, file_id)
        .await
        .map_err(|err| {
            log::error!("Failed to download file {file_id} of delivery {delivery_id}: {err}");
            err
        })?;

    if download.filename.is_none() {
        let files = api.list_delivery_files(delivery_id).await.map_err(|err| {
            log::error!("Failed to list files of delivery {delivery_id}: {err}");
            err
        })?;
        download.filename = files
            .into_iter()
            .find(|file| file.id == file_id)
            .map(|file| file.filename);
    }

    Ok(download)
}

/// Downloads a non-conformity file.
pub async fn download_nce_file<R>(api: &R, nce_id: i32, file_id: i32) -> ServiceResult<FileDownload>
where
    R: FileReader + ?Sized,
{
    let (nce_id, file_id) = ids::<NceId, FileId>(nce_id, file_id)?;

    let download = api
        .download_nce_file(nce_id, file_id)
        .await
        .map_err(|err| {
            log::error!("Failed to download file {file_id} of NCE {nce_id}: {err}");
            err
        })?;

    Ok(download)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockBackend;
    use crate::domain::types::UserRole;
    use crate::services::fixtures::{file_item, user};

    #[actix_web::test]
    async fn download_falls_back_to_stored_filename() {
        let mut api = MockBackend::new();
        api.expect_download_delivery_file().returning(|_, _| {
            Ok(FileDownload {
                filename: None,
                content_type: Some("application/pdf".into()),
                bytes: b"%PDF".to_vec(),
            })
        });
        api.expect_list_delivery_files()
            .with(eq(DeliveryId::new(2).unwrap()))
            .times(1)
            .returning(|_| Ok(vec![file_item(1, "other.txt"), file_item(5, "report.pdf")]));

        let download = download_delivery_file(&api, 2, 5).await.unwrap();

        assert_eq!(download.filename.as_deref(), Some("report.pdf"));
        assert_eq!(download.bytes, b"%PDF");
    }

    #[actix_web::test]
    async fn download_keeps_backend_filename() {
        let mut api = MockBackend::new();
        api.expect_download_nce_file().returning(|_, _| {
            Ok(FileDownload {
                filename: Some("photo.jpg".into()),
                content_type: None,
                bytes: vec![1, 2, 3],
            })
        });
        api.expect_list_delivery_files().times(0);

        let download = download_nce_file(&api, 4, 1).await.unwrap();

        assert_eq!(download.filename.as_deref(), Some("photo.jpg"));
    }

    #[actix_web::test]
    async fn invalid_ids_are_not_found() {
        let api = MockBackend::new();
        assert!(matches!(
            download_delivery_file(&api, 0, 1).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn clients_cannot_delete_files() {
        let mut api = MockBackend::new();
        api.expect_delete_delivery_file().times(0);

        let result = delete_delivery_file(&api, &user(UserRole::Client), 1, 1).await;

        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn delete_propagates_missing_file() {
        let mut api = MockBackend::new();
        api.expect_delete_delivery_file()
            .returning(|_, _| Err(ApiError::NotFound));

        let result = delete_delivery_file(&api, &user(UserRole::Producer), 1, 9).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
