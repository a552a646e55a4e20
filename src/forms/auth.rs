//! Sign-in and registration forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::UserRole;
use crate::domain::user::{Credentials, NewUser};
use crate::forms::{FormError, required_text};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: form.email.trim().to_lowercase(),
            password: form.password,
        })
    }
}

/// Self-service registration; new accounts are producers until an admin
/// changes their role in the backend.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<RegisterForm> for NewUser {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: form.email.trim().to_lowercase(),
            full_name: required_text(&form.full_name, "full name")?,
            password: form.password,
            role: UserRole::Producer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_normalizes_email() {
        let credentials = Credentials::try_from(LoginForm {
            email: "Quality@Example.com".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(credentials.email, "quality@example.com");
    }

    #[test]
    fn login_form_requires_password() {
        let result = Credentials::try_from(LoginForm {
            email: "user@example.com".into(),
            password: String::new(),
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn register_form_defaults_to_producer() {
        let new_user = NewUser::try_from(RegisterForm {
            email: "new@example.com".into(),
            full_name: " Jane Roe ".into(),
            password: "hunter22".into(),
        })
        .unwrap();
        assert_eq!(new_user.role, UserRole::Producer);
        assert_eq!(new_user.full_name, "Jane Roe");
    }
}
