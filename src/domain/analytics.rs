//! Breakdowns computed locally from fetched records.

use serde::Serialize;

use crate::domain::dashboard::DashboardStats;
use crate::domain::delivery::Delivery;
use crate::domain::nce::Nce;
use crate::domain::survey::Survey;
use crate::domain::types::{DeliveryStatus, NceSeverity, NceStatus, SurveyType};

/// Count of records sharing one enum value.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Bucket {
    pub key: &'static str,
    pub label: &'static str,
    pub badge: &'static str,
    pub count: usize,
}

/// Share of `part` in `whole` as a rounded percentage; an empty whole counts as one.
pub fn percentage(part: u64, whole: u64) -> u64 {
    let whole = whole.max(1);
    (part * 100 + whole / 2) / whole
}

pub fn delivery_status_breakdown(deliveries: &[Delivery]) -> Vec<Bucket> {
    DeliveryStatus::ALL
        .iter()
        .map(|&status| Bucket {
            key: status.as_str(),
            label: status.label(),
            badge: status.badge_class(),
            count: deliveries.iter().filter(|d| d.status == status).count(),
        })
        .collect()
}

pub fn nce_severity_breakdown(nces: &[Nce]) -> Vec<Bucket> {
    NceSeverity::ALL
        .iter()
        .map(|&severity| Bucket {
            key: severity.as_str(),
            label: severity.label(),
            badge: severity.badge_class(),
            count: nces.iter().filter(|n| n.severity == severity).count(),
        })
        .collect()
}

pub fn nce_status_breakdown(nces: &[Nce]) -> Vec<Bucket> {
    NceStatus::ALL
        .iter()
        .map(|&status| Bucket {
            key: status.as_str(),
            label: status.label(),
            badge: status.badge_class(),
            count: nces.iter().filter(|n| n.status == status).count(),
        })
        .collect()
}

pub fn survey_type_breakdown(surveys: &[Survey]) -> Vec<Bucket> {
    SurveyType::ALL
        .iter()
        .map(|&survey_type| Bucket {
            key: survey_type.as_str(),
            label: survey_type.label(),
            badge: "secondary",
            count: surveys
                .iter()
                .filter(|s| s.survey_type == survey_type)
                .count(),
        })
        .collect()
}

/// Headline figures of the analytics page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub stats: DashboardStats,
    pub approved_deliveries: usize,
    pub pending_review: usize,
    pub approval_rate: u64,
    pub open_nce_share: u64,
    pub critical_nces: usize,
    pub delivery_statuses: Vec<Bucket>,
    pub nce_severities: Vec<Bucket>,
    pub survey_types: Vec<Bucket>,
}

impl AnalyticsSummary {
    pub fn compute(
        stats: DashboardStats,
        deliveries: &[Delivery],
        nces: &[Nce],
        surveys: &[Survey],
    ) -> Self {
        let approved_deliveries = deliveries
            .iter()
            .filter(|d| d.status == DeliveryStatus::Approved)
            .count();
        let pending_review = deliveries
            .iter()
            .filter(|d| d.status == DeliveryStatus::Delivered)
            .count();
        let critical_nces = nces
            .iter()
            .filter(|n| n.severity == NceSeverity::Critical)
            .count();

        Self {
            approval_rate: percentage(approved_deliveries as u64, deliveries.len() as u64),
            open_nce_share: percentage(stats.open_nces, stats.total_nces),
            approved_deliveries,
            pending_review,
            critical_nces,
            delivery_statuses: delivery_status_breakdown(deliveries),
            nce_severities: nce_severity_breakdown(nces),
            survey_types: survey_type_breakdown(surveys),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{DeliveryId, NceId};

    fn delivery(id: i32, status: DeliveryStatus) -> Delivery {
        Delivery {
            id: DeliveryId::new(id).unwrap(),
            project: None,
            project_ref: None,
            title: format!("Delivery {id}"),
            description: None,
            status,
            version: 1,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            delivered_at: None,
        }
    }

    fn nce(id: i32, severity: NceSeverity, status: NceStatus) -> Nce {
        Nce {
            id: NceId::new(id).unwrap(),
            delivery: None,
            delivery_ref: None,
            title: format!("NCE {id}"),
            description: String::new(),
            severity,
            status,
            category: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            resolved_at: None,
            files: Vec::new(),
        }
    }

    #[test]
    fn percentage_guards_empty_totals() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn summary_counts_statuses_and_severities() {
        let deliveries = vec![
            delivery(1, DeliveryStatus::Approved),
            delivery(2, DeliveryStatus::Approved),
            delivery(3, DeliveryStatus::Delivered),
            delivery(4, DeliveryStatus::Draft),
        ];
        let nces = vec![
            nce(1, NceSeverity::Critical, NceStatus::Open),
            nce(2, NceSeverity::Low, NceStatus::Resolved),
        ];
        let stats = DashboardStats {
            total_deliveries: 4,
            total_nces: 2,
            open_nces: 1,
            avg_nps: 8.5,
            avg_csat: 7.0,
        };

        let summary = AnalyticsSummary::compute(stats, &deliveries, &nces, &[]);

        assert_eq!(summary.approved_deliveries, 2);
        assert_eq!(summary.pending_review, 1);
        assert_eq!(summary.approval_rate, 50);
        assert_eq!(summary.open_nce_share, 50);
        assert_eq!(summary.critical_nces, 1);

        let counts: Vec<_> = summary
            .delivery_statuses
            .iter()
            .map(|b| (b.key, b.count))
            .collect();
        assert_eq!(
            counts,
            vec![("draft", 1), ("delivered", 1), ("approved", 2), ("rejected", 0)]
        );
        assert!(summary.survey_types.iter().all(|b| b.count == 0));
    }

    #[test]
    fn nce_status_breakdown_covers_every_status() {
        let nces = vec![
            nce(1, NceSeverity::Medium, NceStatus::InProgress),
            nce(2, NceSeverity::Medium, NceStatus::InProgress),
        ];
        let buckets = nce_status_breakdown(&nces);
        assert_eq!(buckets.len(), NceStatus::ALL.len());
        assert_eq!(buckets[1].key, "in_progress");
        assert_eq!(buckets[1].count, 2);
    }
}
