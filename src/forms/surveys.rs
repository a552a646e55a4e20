use serde::Deserialize;
use validator::Validate;

use crate::domain::survey::NewSurvey;
use crate::domain::types::{DeliveryId, SurveyScore, SurveyType};
use crate::forms::{FormError, optional_text, parse_required_id};

#[derive(Debug, Deserialize, Validate)]
/// Form data for recording a survey answer.
pub struct AddSurveyForm {
    pub delivery_id: String,
    pub survey_type: String,
    #[validate(range(max = 10))]
    pub score: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TryFrom<AddSurveyForm> for NewSurvey {
    type Error = FormError;

    fn try_from(form: AddSurveyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let delivery_id = parse_required_id::<DeliveryId>(&form.delivery_id, "delivery")?;
        let survey_type: SurveyType = form
            .survey_type
            .parse()
            .map_err(|_| FormError::Invalid("survey type"))?;
        let score = SurveyScore::new(form.score)?;

        Ok(NewSurvey::new(
            delivery_id,
            survey_type,
            score,
            optional_text(form.comment.as_deref()),
        ))
    }
}
