//! Page-level services generic over the backend traits.

use thiserror::Error;

use crate::api::errors::ApiError;
use crate::domain::types::UserRole;
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;

pub mod analytics;
pub mod api;
pub mod auth;
pub mod deliveries;
pub mod files;
pub mod main;
pub mod nces;
pub mod notifications;
pub mod projects;
pub mod surveys;

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod fixtures;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("not allowed: {0}")]
    Forbidden(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("backend error: {0}")]
    Backend(ApiError),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::Forbidden(message) => ServiceError::Forbidden(message),
            ApiError::NotFound => ServiceError::NotFound,
            // Backend validation failures are shown to the user like form errors.
            ApiError::Status {
                status: 400 | 409 | 422,
                message,
            } => ServiceError::Form(message),
            other => ServiceError::Backend(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.user_message())
    }
}

/// Fails with [`ServiceError::Forbidden`] unless the user holds one of `roles`.
pub fn ensure_role(
    user: &AuthenticatedUser,
    roles: &[UserRole],
    action: &str,
) -> ServiceResult<()> {
    if user.has_role(roles) {
        Ok(())
    } else {
        log::warn!(
            "User {} with role {} may not {action}",
            user.email,
            user.role
        );
        Err(ServiceError::Forbidden(format!(
            "You are not allowed to {action}."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_backend_errors() {
        assert!(matches!(
            ServiceError::from(ApiError::Unauthorized),
            ServiceError::Unauthorized
        ));
        assert!(matches!(
            ServiceError::from(ApiError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(ApiError::from_status(422, "title is required")),
            ServiceError::Form(message) if message == "title is required"
        ));
        assert!(matches!(
            ServiceError::from(ApiError::from_status(500, "boom")),
            ServiceError::Backend(ApiError::Status { status: 500, .. })
        ));
    }
}
