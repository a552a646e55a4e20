use crate::domain::dashboard::{Activity, DashboardStats};

/// Data required to render the dashboard.
pub struct DashboardPageData {
    pub stats: DashboardStats,
    /// Most recent events, newest first.
    pub activities: Vec<Activity>,
}
