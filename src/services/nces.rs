use crate::api::{DeliveryListQuery, DeliveryReader, FileWriter, NceReader, NceWriter};
use crate::domain::analytics::{nce_severity_breakdown, nce_status_breakdown};
use crate::domain::nce::{Nce, NceUpdate};
use crate::domain::types::NceId;
use crate::dto::nces::{NceCreated, NceFilters, NcePageData, NcesPageData};
use crate::forms::nces::{AddNceForm, NceUpdateForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::services::deliveries::fetch_delivery;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{AUTHOR_ROLES, REVIEW_ROLES};

/// Size of the delivery pick list on the report form.
const DELIVERY_PICK_LIST_LIMIT: usize = 100;

/// Loads one page of non-conformities with per-status and per-severity counts.
pub async fn load_nces_page<R>(
    api: &R,
    filters: NceFilters,
    per_page: usize,
) -> ServiceResult<NcesPageData>
where
    R: NceReader + DeliveryReader + ?Sized,
{
    let page = filters.page();
    let (total, nces) = api
        .list_nces(filters.to_list_query(per_page))
        .await
        .map_err(|err| {
            log::error!("Failed to list NCEs: {err}");
            err
        })?;

    let (_, deliveries) = api
        .list_deliveries(DeliveryListQuery::new().paginate(1, DELIVERY_PICK_LIST_LIMIT))
        .await
        .map_err(|err| {
            log::error!("Failed to list deliveries: {err}");
            err
        })?;

    Ok(NcesPageData {
        status_counts: nce_status_breakdown(&nces),
        severity_counts: nce_severity_breakdown(&nces),
        nces: Paginated::new(nces, page, total, per_page),
        filter_query: filters.query_string(),
        filters: filters.normalized(),
        deliveries,
    })
}

/// Loads a non-conformity and its parent delivery.
pub async fn load_nce_page<R>(
    api: &R,
    user: &AuthenticatedUser,
    nce_id: i32,
) -> ServiceResult<NcePageData>
where
    R: NceReader + DeliveryReader + ?Sized,
{
    let nce_id = NceId::new(nce_id).map_err(|_| ServiceError::NotFound)?;

    let nce = api
        .get_nce(nce_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get NCE {nce_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let delivery = match (&nce.delivery, nce.delivery_id()) {
        (Some(delivery), _) => Some(delivery.clone()),
        (None, Some(delivery_id)) => match fetch_delivery(api, delivery_id).await {
            Ok(delivery) => Some(delivery),
            // The parent may be hidden from this user; the NCE is still shown.
            Err(ServiceError::NotFound | ServiceError::Forbidden(_)) => None,
            Err(err) => return Err(err),
        },
        (None, None) => None,
    };

    Ok(NcePageData {
        nce,
        delivery,
        can_review: user.has_role(REVIEW_ROLES),
        can_edit: user.has_role(AUTHOR_ROLES),
    })
}

/// Reports a non-conformity and uploads its evidence files.
///
/// The files are uploaded after the NCE is stored; an upload failure does not
/// undo the NCE and is reported through [`NceCreated::upload_failed`].
pub async fn create_nce<R>(
    api: &R,
    form: AddNceForm,
) -> ServiceResult<NceCreated>
where
    R: NceWriter + FileWriter + ?Sized,
{
    let payload = form.into_payload().map_err(|err| {
        log::error!("Failed to validate NCE form: {err}");
        err
    })?;

    let nce = api.create_nce(&payload.nce).await.map_err(|err| {
        log::error!("Failed to create NCE: {err}");
        err
    })?;

    if payload.files.is_empty() {
        return Ok(NceCreated {
            nce,
            attached: 0,
            upload_failed: false,
        });
    }

    match api.upload_nce_files(nce.id, payload.files).await {
        Ok(files) => Ok(NceCreated {
            attached: files.len(),
            nce,
            upload_failed: false,
        }),
        Err(err) => {
            log::error!("Failed to upload files to NCE {}: {err}", nce.id);
            Ok(NceCreated {
                nce,
                attached: 0,
                upload_failed: true,
            })
        }
    }
}

/// Applies a single-field edit to a non-conformity.
pub async fn update_nce<R>(
    api: &R,
    user: &AuthenticatedUser,
    nce_id: i32,
    form: NceUpdateForm,
) -> ServiceResult<Nce>
where
    R: NceWriter + ?Sized,
{
    let nce_id = NceId::new(nce_id).map_err(|_| ServiceError::NotFound)?;
    let update = NceUpdate::try_from(form)?;

    if update.status.is_some() || update.severity.is_some() {
        ensure_role(user, REVIEW_ROLES, "triage non-conformities")?;
    } else {
        ensure_role(user, AUTHOR_ROLES, "edit non-conformities")?;
    }

    let nce = api.update_nce(nce_id, &update).await.map_err(|err| {
        log::error!("Failed to update NCE {nce_id}: {err}");
        err
    })?;

    Ok(nce)
}
