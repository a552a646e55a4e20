//! Error conversion glue between the `data` layer and the server layers.
//!
//! The domain layer must not depend on service or backend error types, so the
//! conversions from [`TypeConstraintError`] live here.

use crate::api::errors::ApiError;
use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(val: TypeConstraintError) -> Self {
        ApiError::Decode(val.to_string())
    }
}
