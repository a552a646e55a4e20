use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{FileId, timestamp};

/// File attached to a delivery or a non-conformity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileItem {
    pub id: FileId,
    pub filename: String,
    pub storage_key: String,
    #[serde(with = "timestamp")]
    pub uploaded_at: NaiveDateTime,
    #[serde(default)]
    pub is_receipt: bool,
}

/// File content to upload.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Downloaded file content.
#[derive(Clone, Debug, PartialEq)]
pub struct FileDownload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Extracts the filename from a `Content-Disposition` header value.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_disposition_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="report v2.pdf""#).as_deref(),
            Some("report v2.pdf")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=plan.xlsx").as_deref(),
            Some("plan.xlsx")
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }
}
