use crate::domain::analytics::{AnalyticsSummary, Bucket};

/// Data required to render the analytics page.
pub struct AnalyticsPageData {
    pub summary: AnalyticsSummary,
    /// Status distribution of the fetched non-conformities.
    pub nce_statuses: Vec<Bucket>,
}
