//! Signed-in user stored in the identity cookie.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, UserRole};
use crate::domain::user::TokenResponse;

/// User attached to the current session together with the backend access
/// token used for every call made on their behalf.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub token: String,
}

impl AuthenticatedUser {
    /// Whether the user holds any of `roles`.
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }

    /// Stores the user in the identity cookie.
    pub fn login(&self, req: &HttpRequest) -> Result<Identity, actix_web::Error> {
        let payload = serde_json::to_string(self)?;
        Identity::login(&req.extensions(), payload)
            .map_err(|err| actix_web::error::ErrorInternalServerError(err.to_string()))
    }

    /// Copy safe to hand to templates.
    pub fn without_token(&self) -> Self {
        Self {
            token: String::new(),
            ..self.clone()
        }
    }
}

impl From<TokenResponse> for AuthenticatedUser {
    fn from(response: TokenResponse) -> Self {
        Self {
            id: response.user.id,
            email: response.user.email,
            full_name: response.user.full_name,
            role: response.user.role,
            token: response.access_token,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| serde_json::from_str::<AuthenticatedUser>(&id).ok())
            .filter(|user| !user.token.is_empty());

        ready(user.ok_or_else(|| ErrorUnauthorized("Not signed in")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1).unwrap(),
            email: "q@example.com".into(),
            full_name: String::new(),
            role,
            token: "token".into(),
        }
    }

    #[test]
    fn checks_roles() {
        let quality = user(UserRole::Quality);
        assert!(quality.has_role(&[UserRole::Admin, UserRole::Quality]));
        assert!(!quality.has_role(&[UserRole::Admin]));
    }

    #[test]
    fn hides_token_from_templates() {
        let quality = user(UserRole::Quality);
        assert_eq!(quality.display_name(), "q@example.com");

        let json = serde_json::to_value(quality.without_token()).unwrap();
        assert!(json.get("token").is_none());
    }

    #[test]
    fn round_trips_through_identity_payload() {
        let quality = user(UserRole::Quality);
        let payload = serde_json::to_string(&quality).unwrap();
        let restored: AuthenticatedUser = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored, quality);
    }
}
