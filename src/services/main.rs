use crate::api::DashboardReader;
use crate::dto::main::DashboardPageData;
use crate::services::ServiceResult;

/// Number of events shown in the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Loads the headline statistics and recent activity for the dashboard.
pub async fn load_dashboard<R>(api: &R) -> ServiceResult<DashboardPageData>
where
    R: DashboardReader + ?Sized,
{
    let stats = api.dashboard_stats().await.map_err(|err| {
        log::error!("Failed to load dashboard stats: {err}");
        err
    })?;

    let activities = api
        .recent_activity(RECENT_ACTIVITY_LIMIT)
        .await
        .map_err(|err| {
            log::error!("Failed to load recent activity: {err}");
            err
        })?;

    Ok(DashboardPageData { stats, activities })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockBackend;
    use crate::domain::dashboard::{Activity, DashboardStats};
    use crate::services::ServiceError;
    use crate::services::fixtures::stamp;

    #[actix_web::test]
    async fn loads_stats_and_five_latest_events() {
        let mut api = MockBackend::new();
        api.expect_dashboard_stats().times(1).returning(|| {
            Ok(DashboardStats {
                total_deliveries: 12,
                open_nces: 3,
                ..DashboardStats::default()
            })
        });
        api.expect_recent_activity()
            .with(eq(RECENT_ACTIVITY_LIMIT))
            .times(1)
            .returning(|_| {
                Ok(vec![Activity {
                    title: "Delivery approved".into(),
                    name: "Batch 4".into(),
                    date: stamp(),
                }])
            });

        let page = load_dashboard(&api).await.unwrap();

        assert_eq!(page.stats.total_deliveries, 12);
        assert_eq!(page.activities.len(), 1);
    }

    #[actix_web::test]
    async fn expired_session_is_reported_as_unauthorized() {
        let mut api = MockBackend::new();
        api.expect_dashboard_stats()
            .returning(|| Err(ApiError::Unauthorized));
        api.expect_recent_activity().times(0);

        let result = load_dashboard(&api).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
