use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::timestamp;

/// Aggregate counters computed by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardStats {
    pub total_deliveries: u64,
    pub total_nces: u64,
    pub open_nces: u64,
    pub avg_nps: f64,
    pub avg_csat: f64,
}

/// Entry of the recent-activity feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
}
