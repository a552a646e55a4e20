use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::delivery::Delivery;
use crate::domain::normalize_optional;
use crate::domain::types::{DeliveryId, SurveyId, SurveyScore, SurveyType, timestamp};

/// NPS or CSAT survey collected for a delivery.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Survey {
    pub id: SurveyId,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default, rename = "delivery_id")]
    pub delivery_ref: Option<DeliveryId>,
    pub survey_type: SurveyType,
    #[serde(default)]
    pub score: Option<SurveyScore>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(with = "timestamp")]
    pub sent_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<NaiveDateTime>,
}

impl Survey {
    pub fn delivery_id(&self) -> Option<DeliveryId> {
        self.delivery.as_ref().map(|d| d.id).or(self.delivery_ref)
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Payload for `POST /api/surveys`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewSurvey {
    pub delivery_id: DeliveryId,
    pub survey_type: SurveyType,
    pub score: SurveyScore,
    pub comment: Option<String>,
}

impl NewSurvey {
    #[must_use]
    pub fn new(
        delivery_id: DeliveryId,
        survey_type: SurveyType,
        score: SurveyScore,
        comment: Option<String>,
    ) -> Self {
        Self {
            delivery_id,
            survey_type,
            score,
            comment: normalize_optional(comment),
        }
    }
}
