use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::delivery::NewDelivery;
use crate::domain::file::UploadFile;
use crate::domain::types::{DeliveryStatus, ProjectId};
use crate::forms::{FormError, optional_text, parse_required_id, read_uploads, required_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a delivery.
pub struct AddDeliveryForm {
    pub project_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<AddDeliveryForm> for NewDelivery {
    type Error = FormError;

    fn try_from(form: AddDeliveryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let project_id = parse_required_id::<ProjectId>(&form.project_id, "project")?;
        Ok(NewDelivery::new(
            project_id,
            required_text(&form.title, "title")?,
            optional_text(form.description.as_deref()),
        ))
    }
}

#[derive(Debug, Deserialize)]
/// Status button posted from the delivery detail page.
pub struct DeliveryStatusForm {
    pub status: String,
}

impl TryFrom<DeliveryStatusForm> for DeliveryStatus {
    type Error = FormError;

    fn try_from(form: DeliveryStatusForm) -> Result<Self, Self::Error> {
        form.status
            .parse()
            .map_err(|_| FormError::Invalid("delivery status"))
    }
}

#[derive(MultipartForm)]
/// Files attached to a delivery.
pub struct UploadFilesForm {
    #[multipart(limit = "50MB")]
    pub files: Vec<TempFile>,
}

impl UploadFilesForm {
    /// Reads the uploaded files, failing when none were selected.
    pub fn into_uploads(self) -> Result<Vec<UploadFile>, FormError> {
        let uploads = read_uploads(self.files)?;
        if uploads.is_empty() {
            return Err(FormError::Required("file"));
        }
        Ok(uploads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_delivery_form() {
        let delivery = NewDelivery::try_from(AddDeliveryForm {
            project_id: "5".into(),
            title: " Foundation materials ".into(),
            description: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(delivery.project_id, ProjectId::new(5).unwrap());
        assert_eq!(delivery.title, "Foundation materials");
        assert_eq!(delivery.description, None);
    }

    #[test]
    fn delivery_text_keeps_ampersands_and_angle_brackets() {
        let delivery = NewDelivery::try_from(AddDeliveryForm {
            project_id: "5".into(),
            title: "R&D <v2> review".into(),
            description: Some("Tolerance < 0.5 mm & flatness".into()),
        })
        .unwrap();

        assert_eq!(delivery.title, "R&D <v2> review");
        assert_eq!(
            delivery.description.as_deref(),
            Some("Tolerance < 0.5 mm & flatness")
        );
    }

    #[test]
    fn delivery_form_requires_project_and_title() {
        assert!(matches!(
            NewDelivery::try_from(AddDeliveryForm {
                project_id: String::new(),
                title: "Batch".into(),
                description: None,
            }),
            Err(FormError::Required("project"))
        ));
        assert!(matches!(
            NewDelivery::try_from(AddDeliveryForm {
                project_id: "1".into(),
                title: String::new(),
                description: None,
            }),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn status_form_parses_wire_values() {
        let status = DeliveryStatus::try_from(DeliveryStatusForm {
            status: "Approved".into(),
        })
        .unwrap();
        assert_eq!(status, DeliveryStatus::Approved);
        assert!(
            DeliveryStatus::try_from(DeliveryStatusForm {
                status: "shipped".into()
            })
            .is_err()
        );
    }
}
