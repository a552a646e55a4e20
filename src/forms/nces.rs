use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;

use crate::domain::file::UploadFile;
use crate::domain::nce::{NewNce, NceUpdate};
use crate::domain::types::{DeliveryId, NceSeverity, NceStatus};
use crate::forms::{FormError, optional_text, parse_required_id, read_uploads, required_text};

/// Multipart form for reporting a non-conformity with optional evidence files.
#[derive(MultipartForm)]
pub struct AddNceForm {
    pub delivery_id: Text<String>,
    pub title: Text<String>,
    pub description: Text<String>,
    pub severity: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(limit = "50MB")]
    pub files: Vec<TempFile>,
}

/// Validated content of [`AddNceForm`].
#[derive(Debug)]
pub struct NcePayload {
    pub nce: NewNce,
    pub files: Vec<UploadFile>,
}

impl AddNceForm {
    pub fn into_payload(self) -> Result<NcePayload, FormError> {
        let delivery_id = parse_required_id::<DeliveryId>(&self.delivery_id, "delivery")?;
        let severity = match self
            .severity
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            Some(raw) => raw.parse().map_err(|_| FormError::Invalid("severity"))?,
            None => NceSeverity::default(),
        };
        let nce = NewNce::new(
            delivery_id,
            required_text(&self.title, "title")?,
            required_text(&self.description, "description")?,
            severity,
            optional_text(self.category.as_ref().map(|c| c.as_str())),
        );
        let files = read_uploads(self.files)?;

        Ok(NcePayload { nce, files })
    }
}

/// Single-field edit posted from the NCE detail page.
#[derive(Debug, Default, Deserialize)]
pub struct NceUpdateForm {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TryFrom<NceUpdateForm> for NceUpdate {
    type Error = FormError;

    fn try_from(form: NceUpdateForm) -> Result<Self, Self::Error> {
        match (form.status, form.severity, form.category) {
            (Some(status), None, None) => {
                let status: NceStatus = status.parse().map_err(|_| FormError::Invalid("status"))?;
                Ok(NceUpdate::status(status))
            }
            (None, Some(severity), None) => {
                let severity: NceSeverity = severity
                    .parse()
                    .map_err(|_| FormError::Invalid("severity"))?;
                Ok(NceUpdate::severity(severity))
            }
            (None, None, Some(category)) => {
                Ok(NceUpdate::category(required_text(&category, "category")?))
            }
            _ => Err(FormError::Invalid("update")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_form_accepts_exactly_one_field() {
        let update = NceUpdate::try_from(NceUpdateForm {
            status: Some("in_progress".into()),
            ..NceUpdateForm::default()
        })
        .unwrap();
        assert_eq!(update, NceUpdate::status(NceStatus::InProgress));

        let update = NceUpdate::try_from(NceUpdateForm {
            category: Some(" Packaging ".into()),
            ..NceUpdateForm::default()
        })
        .unwrap();
        assert_eq!(update.category.as_deref(), Some("Packaging"));

        assert!(matches!(
            NceUpdate::try_from(NceUpdateForm {
                status: Some("open".into()),
                severity: Some("low".into()),
                category: None,
            }),
            Err(FormError::Invalid("update"))
        ));
        assert!(NceUpdate::try_from(NceUpdateForm::default()).is_err());
    }

    #[test]
    fn update_form_rejects_unknown_values() {
        assert!(matches!(
            NceUpdate::try_from(NceUpdateForm {
                severity: Some("catastrophic".into()),
                ..NceUpdateForm::default()
            }),
            Err(FormError::Invalid("severity"))
        ));
        assert!(matches!(
            NceUpdate::try_from(NceUpdateForm {
                category: Some("   ".into()),
                ..NceUpdateForm::default()
            }),
            Err(FormError::Required("category"))
        ));
    }
}
