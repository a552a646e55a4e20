use serde::Deserialize;
use validator::Validate;

use crate::domain::project::NewProject;
use crate::domain::types::ClientId;
use crate::forms::{FormError, optional_text, parse_optional_id, required_text};

/// Form data for creating a project.
///
/// Either an existing client is picked from the list or a new client email is
/// typed in; the picked client wins when both are present.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProjectForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub client_email: Option<String>,
}

impl TryFrom<AddProjectForm> for NewProject {
    type Error = FormError;

    fn try_from(mut form: AddProjectForm) -> Result<Self, Self::Error> {
        // An empty email input is posted as an empty string.
        form.client_email = form
            .client_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        form.validate()?;

        let client_id = parse_optional_id::<ClientId>(form.client_id.as_deref(), "client")?;
        if client_id.is_none() && form.client_email.is_none() {
            return Err(FormError::Required("client"));
        }

        Ok(NewProject::new(
            required_text(&form.name, "name")?,
            optional_text(form.description.as_deref()),
            client_id,
            form.client_email,
        ))
    }
}
