use crate::api::{
    DashboardReader, DeliveryListQuery, DeliveryReader, NceListQuery, NceReader, SurveyListQuery,
    SurveyReader,
};
use crate::domain::analytics::{AnalyticsSummary, nce_status_breakdown};
use crate::dto::analytics::AnalyticsPageData;
use crate::services::ServiceResult;

/// Loads the stats and computes the analytics breakdowns.
///
/// Lists are fetched without paging so the backend applies its default
/// window.
pub async fn load_analytics<R>(api: &R) -> ServiceResult<AnalyticsPageData>
where
    R: DashboardReader + DeliveryReader + NceReader + SurveyReader + ?Sized,
{
    let stats = api.dashboard_stats().await.map_err(|err| {
        log::error!("Failed to load dashboard stats: {err}");
        err
    })?;

    let (_, deliveries) = api
        .list_deliveries(DeliveryListQuery::new())
        .await
        .map_err(|err| {
            log::error!("Failed to list deliveries: {err}");
            err
        })?;

    let (_, nces) = api.list_nces(NceListQuery::new()).await.map_err(|err| {
        log::error!("Failed to list NCEs: {err}");
        err
    })?;

    let (_, surveys) = api
        .list_surveys(SurveyListQuery::new())
        .await
        .map_err(|err| {
            log::error!("Failed to list surveys: {err}");
            err
        })?;

    Ok(AnalyticsPageData {
        nce_statuses: nce_status_breakdown(&nces),
        summary: AnalyticsSummary::compute(stats, &deliveries, &nces, &surveys),
    })
}
