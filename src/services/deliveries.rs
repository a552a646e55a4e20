use crate::api::{
    DeliveryReader, DeliveryWriter, FileReader, NceListQuery, NceReader, ProjectListQuery,
    ProjectReader, SurveyListQuery, SurveyReader,
};
use crate::domain::delivery::{Delivery, NewDelivery};
use crate::domain::types::{DeliveryId, DeliveryStatus};
use crate::dto::deliveries::{DeliveriesPageData, DeliveryFilters, DeliveryPageData};
use crate::forms::deliveries::{AddDeliveryForm, DeliveryStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{AUTHOR_ROLES, REVIEW_ROLES};

/// Size of the project pick list on the create form.
const PROJECT_PICK_LIST_LIMIT: usize = 100;

/// Loads one page of deliveries matching the filters.
pub async fn load_deliveries_page<R>(
    api: &R,
    user: &AuthenticatedUser,
    filters: DeliveryFilters,
    per_page: usize,
) -> ServiceResult<DeliveriesPageData>
where
    R: DeliveryReader + ProjectReader + ?Sized,
{
    let page = filters.page();
    let (total, deliveries) = api
        .list_deliveries(filters.to_list_query(per_page))
        .await
        .map_err(|err| {
            log::error!("Failed to list deliveries: {err}");
            err
        })?;

    let can_create = user.has_role(AUTHOR_ROLES);
    let projects = if can_create {
        let (_, projects) = api
            .list_projects(ProjectListQuery::new().paginate(1, PROJECT_PICK_LIST_LIMIT))
            .await
            .map_err(|err| {
                log::error!("Failed to list projects: {err}");
                err
            })?;
        projects
    } else {
        Vec::new()
    };

    Ok(DeliveriesPageData {
        deliveries: Paginated::new(deliveries, page, total, per_page),
        filter_query: filters.query_string(),
        filters: filters.normalized(),
        projects,
        can_create,
    })
}

/// Fetches a delivery or fails with [`ServiceError::NotFound`].
pub(crate) async fn fetch_delivery<R>(api: &R, delivery_id: DeliveryId) -> ServiceResult<Delivery>
where
    R: DeliveryReader + ?Sized,
{
    api.get_delivery(delivery_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get delivery {delivery_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Loads a delivery with its project, non-conformities and files.
pub async fn load_delivery_page<R>(
    api: &R,
    user: &AuthenticatedUser,
    delivery_id: i32,
) -> ServiceResult<DeliveryPageData>
where
    R: DeliveryReader + ProjectReader + NceReader + SurveyReader + FileReader + ?Sized,
{
    let delivery_id = DeliveryId::new(delivery_id).map_err(|_| ServiceError::NotFound)?;
    let delivery = fetch_delivery(api, delivery_id).await?;

    let project = match (&delivery.project, delivery.project_id()) {
        (Some(project), _) => Some(project.clone()),
        (None, Some(project_id)) => api.get_project(project_id).await.map_err(|err| {
            log::error!("Failed to get project {project_id}: {err}");
            err
        })?,
        (None, None) => None,
    };

    let (_, nces) = api
        .list_nces(NceListQuery::new().delivery(delivery_id))
        .await
        .map_err(|err| {
            log::error!("Failed to list NCEs of delivery {delivery_id}: {err}");
            err
        })?;

    let (_, surveys) = api
        .list_surveys(SurveyListQuery::new().delivery(delivery_id))
        .await
        .map_err(|err| {
            log::error!("Failed to list surveys of delivery {delivery_id}: {err}");
            err
        })?;

    let files = api.list_delivery_files(delivery_id).await.map_err(|err| {
        log::error!("Failed to list files of delivery {delivery_id}: {err}");
        err
    })?;

    Ok(DeliveryPageData {
        delivery,
        project,
        nces,
        surveys,
        files,
        can_review: user.has_role(REVIEW_ROLES),
        can_upload: user.has_role(AUTHOR_ROLES),
    })
}

/// Validates the form and creates a delivery.
pub async fn create_delivery<R>(
    api: &R,
    user: &AuthenticatedUser,
    form: AddDeliveryForm,
) -> ServiceResult<Delivery>
where
    R: DeliveryWriter + ?Sized,
{
    ensure_role(user, AUTHOR_ROLES, "create deliveries")?;

    let new_delivery = NewDelivery::try_from(form).map_err(|err| {
        log::error!("Failed to validate delivery form: {err}");
        err
    })?;

    let delivery = api.create_delivery(&new_delivery).await.map_err(|err| {
        log::error!("Failed to create delivery: {err}");
        err
    })?;

    Ok(delivery)
}

/// Moves a delivery to the posted status.
pub async fn update_delivery_status<R>(
    api: &R,
    user: &AuthenticatedUser,
    delivery_id: i32,
    form: DeliveryStatusForm,
) -> ServiceResult<Delivery>
where
    R: DeliveryWriter + ?Sized,
{
    ensure_role(user, REVIEW_ROLES, "change delivery status")?;

    let delivery_id = DeliveryId::new(delivery_id).map_err(|_| ServiceError::NotFound)?;
    let status = DeliveryStatus::try_from(form)?;

    let delivery = api
        .update_delivery_status(delivery_id, status)
        .await
        .map_err(|err| {
            log::error!("Failed to update status of delivery {delivery_id}: {err}");
            err
        })?;

    Ok(delivery)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::domain::types::{NceSeverity, NceStatus, ProjectId, SurveyType, UserRole};
    use crate::services::fixtures::{delivery, file_item, nce, project, survey, user};

    #[actix_web::test]
    async fn list_maps_filters_and_clamps_page() {
        let mut api = MockBackend::new();
        api.expect_list_deliveries()
            .withf(|query| {
                query.status == Some(DeliveryStatus::Delivered)
                    && query.client_email.as_deref() == Some("buyer@example.com")
            })
            .times(1)
            .returning(|_| Ok((3, vec![delivery(1, DeliveryStatus::Delivered)])));
        api.expect_list_projects().times(0);

        let filters = DeliveryFilters {
            status: Some("delivered".into()),
            client: Some("buyer@example.com".into()),
            page: Some(9),
            ..DeliveryFilters::default()
        };
        let page = load_deliveries_page(&api, &user(UserRole::Client), filters, 20)
            .await
            .unwrap();

        assert_eq!(page.deliveries.page, 1);
        assert_eq!(page.deliveries.next, None);
        assert!(!page.can_create);
        assert_eq!(
            page.filter_query,
            "status=delivered&client=buyer%40example.com"
        );
    }

    #[actix_web::test]
    async fn detail_fetches_project_when_only_id_is_known() {
        let mut api = MockBackend::new();
        api.expect_get_delivery()
            .with(eq(DeliveryId::new(3).unwrap()))
            .returning(|_| Ok(Some(delivery(3, DeliveryStatus::Delivered))));
        api.expect_get_project()
            .with(eq(ProjectId::new(1).unwrap()))
            .times(1)
            .returning(|_| Ok(Some(project(1))));
        api.expect_list_nces()
            .withf(|query| query.delivery_id == DeliveryId::new(3).ok())
            .returning(|_| Ok((1, vec![nce(1, NceSeverity::Low, NceStatus::Open)])));
        api.expect_list_surveys()
            .withf(|query| {
                query.delivery_id == DeliveryId::new(3).ok() && query.pagination.is_none()
            })
            .times(1)
            .returning(|_| Ok((1, vec![survey(4, SurveyType::Nps, 9)])));
        api.expect_list_delivery_files()
            .returning(|_| Ok(vec![file_item(1, "report.pdf")]));

        let page = load_delivery_page(&api, &user(UserRole::Quality), 3)
            .await
            .unwrap();

        assert_eq!(page.project.map(|p| p.id), ProjectId::new(1).ok());
        assert_eq!(page.nces.len(), 1);
        assert_eq!(page.surveys.len(), 1);
        assert_eq!(page.files.len(), 1);
        assert!(page.can_review);
    }

    #[actix_web::test]
    async fn missing_delivery_is_not_found() {
        let mut api = MockBackend::new();
        api.expect_get_delivery().returning(|_| Ok(None));
        api.expect_list_nces().times(0);

        let result = load_delivery_page(&api, &user(UserRole::Quality), 3).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn producers_cannot_change_status() {
        let mut api = MockBackend::new();
        api.expect_update_delivery_status().times(0);

        let result = update_delivery_status(
            &api,
            &user(UserRole::Producer),
            3,
            DeliveryStatusForm {
                status: "approved".into(),
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn reviewers_change_status() {
        let mut api = MockBackend::new();
        api.expect_update_delivery_status()
            .with(eq(DeliveryId::new(3).unwrap()), eq(DeliveryStatus::Rejected))
            .times(1)
            .returning(|_, status| Ok(delivery(3, status)));

        let updated = update_delivery_status(
            &api,
            &user(UserRole::Admin),
            3,
            DeliveryStatusForm {
                status: "rejected".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, DeliveryStatus::Rejected);
    }

    #[actix_web::test]
    async fn producers_create_deliveries() {
        let mut api = MockBackend::new();
        api.expect_create_delivery()
            .withf(|new_delivery| new_delivery.title == "Steel beams")
            .times(1)
            .returning(|_| Ok(delivery(8, DeliveryStatus::Draft)));

        let created = create_delivery(
            &api,
            &user(UserRole::Producer),
            AddDeliveryForm {
                project_id: "1".into(),
                title: " Steel beams ".into(),
                description: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(created.id, DeliveryId::new(8).unwrap());
    }
}
