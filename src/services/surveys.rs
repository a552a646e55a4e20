use crate::api::{DeliveryListQuery, DeliveryReader, SurveyReader, SurveyWriter};
use crate::domain::survey::{NewSurvey, Survey};
use crate::dto::surveys::{SurveyFilters, SurveysPageData};
use crate::forms::surveys::AddSurveyForm;
use crate::pagination::Paginated;
use crate::services::ServiceResult;

const DELIVERY_PICK_LIST_LIMIT: usize = 100;

/// Loads one page of surveys.
pub async fn load_surveys_page<R>(
    api: &R,
    filters: SurveyFilters,
    per_page: usize,
) -> ServiceResult<SurveysPageData>
where
    R: SurveyReader + DeliveryReader + ?Sized,
{
    let page = filters.page();
    let (total, surveys) = api
        .list_surveys(filters.to_list_query(per_page))
        .await
        .map_err(|err| {
            log::error!("Failed to list surveys: {err}");
            err
        })?;

    let (_, deliveries) = api
        .list_deliveries(DeliveryListQuery::new().paginate(1, DELIVERY_PICK_LIST_LIMIT))
        .await
        .map_err(|err| {
            log::error!("Failed to list deliveries: {err}");
            err
        })?;

    Ok(SurveysPageData {
        surveys: Paginated::new(surveys, page, total, per_page),
        filter_query: filters.query_string(),
        filters: filters.normalized(),
        deliveries,
    })
}

/// Records a survey answer.
pub async fn create_survey<R>(api: &R, form: AddSurveyForm) -> ServiceResult<Survey>
where
    R: SurveyWriter + ?Sized,
{
    let new_survey = NewSurvey::try_from(form).map_err(|err| {
        log::error!("Failed to validate survey form: {err}");
        err
    })?;

    let survey = api.create_survey(&new_survey).await.map_err(|err| {
        log::error!("Failed to create survey: {err}");
        err
    })?;

    Ok(survey)
}
