use thiserror::Error;

/// Failures talking to the quality-tracking backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Not authorized: {0}")]
    Forbidden(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Builds the error for a non-2xx response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound,
            _ => ApiError::Status { status, message },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Extracts a readable message from an error body.
///
/// The backend reports errors as `{"detail": "..."}`; validation failures carry
/// a list of `{"msg": "..."}` objects instead.
pub fn error_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback.to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => {
            let messages = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>();
            if messages.is_empty() {
                fallback.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound));
        assert!(matches!(
            ApiError::from_status(403, "Not authorized"),
            ApiError::Forbidden(msg) if msg == "Not authorized"
        ));
        assert!(matches!(
            ApiError::from_status(500, "boom"),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn reads_detail_messages() {
        assert_eq!(
            error_message(r#"{"detail": "Incorrect email or password"}"#, "Unauthorized"),
            "Incorrect email or password"
        );
        assert_eq!(
            error_message(
                r#"{"detail": [{"msg": "field required"}, {"msg": "value is not a valid integer"}]}"#,
                "Unprocessable Entity"
            ),
            "field required; value is not a valid integer"
        );
        assert_eq!(error_message("<html>", "Bad Gateway"), "Bad Gateway");
    }
}
