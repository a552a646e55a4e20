use serde::{Deserialize, Serialize};

use crate::api::SurveyListQuery;
use crate::domain::delivery::Delivery;
use crate::domain::survey::Survey;
use crate::domain::types::SurveyType;
use crate::dto::{choice_filter, encode_filters};
use crate::pagination::Paginated;

/// Query string of the surveys list page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SurveyFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_type: Option<String>,
    #[serde(default, skip_serializing)]
    pub page: Option<usize>,
}

impl SurveyFilters {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    fn survey_type(&self) -> Option<SurveyType> {
        choice_filter(self.survey_type.as_deref(), "survey_type")
    }

    pub fn to_list_query(&self, per_page: usize) -> SurveyListQuery {
        let query = SurveyListQuery::new().paginate(self.page(), per_page);
        match self.survey_type() {
            Some(survey_type) => query.survey_type(survey_type),
            None => query,
        }
    }

    pub fn normalized(&self) -> Self {
        Self {
            survey_type: self.survey_type().map(|t| t.as_str().to_string()),
            page: None,
        }
    }

    pub fn query_string(&self) -> String {
        encode_filters(&self.normalized())
    }
}

/// Data required to render the surveys list.
pub struct SurveysPageData {
    pub surveys: Paginated<Survey>,
    pub filters: SurveyFilters,
    pub filter_query: String,
    /// Pick list for the survey form.
    pub deliveries: Vec<Delivery>,
}
