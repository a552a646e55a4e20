//! Form definitions backing the dashboard routes.

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::file::UploadFile;
use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod deliveries;
pub mod nces;
pub mod projects;
pub mod surveys;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid {0}")]
    Invalid(&'static str),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("failed to read uploaded file: {0}")]
    File(#[from] std::io::Error),
}

impl FormError {
    /// Message shown to the user in a flash alert.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(_) => "Please fill in all required fields.".to_string(),
            FormError::File(_) => "Could not read the uploaded file.".to_string(),
            other => {
                let message = other.to_string();
                let mut chars = message.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
                    None => message,
                }
            }
        }
    }
}

/// Trims optional free text, dropping it when blank.
///
/// Text is sent to the backend as typed; templates escape it on output.
pub(crate) fn optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trims required free text, failing when blank.
pub(crate) fn required_text(text: &str, field: &'static str) -> Result<String, FormError> {
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(text)
}

/// Parses an identifier posted from a `<select>`; blank means "none".
pub(crate) fn parse_optional_id<T>(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, FormError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => {
            let id: i32 = raw.parse().map_err(|_| FormError::Invalid(field))?;
            T::try_from(id).map(Some).map_err(|_| FormError::Invalid(field))
        }
    }
}

/// Parses a required identifier posted from a `<select>`.
pub(crate) fn parse_required_id<T>(value: &str, field: &'static str) -> Result<T, FormError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    parse_optional_id(Some(value), field)?.ok_or(FormError::Required(field))
}

/// Reads uploaded temp files into memory, skipping empty file inputs.
pub(crate) fn read_uploads(files: Vec<TempFile>) -> Result<Vec<UploadFile>, FormError> {
    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        if file.size == 0 {
            continue;
        }
        let filename = file
            .file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = file.content_type.as_ref().map(|mime| mime.to_string());
        let bytes = std::fs::read(file.file.path())?;
        uploads.push(UploadFile {
            filename,
            content_type,
            bytes,
        });
    }
    Ok(uploads)
}
