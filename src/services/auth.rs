use crate::api::AuthApi;
use crate::api::errors::ApiError;
use crate::domain::user::{Credentials, NewUser};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult};

/// Exchanges the submitted credentials for a backend session.
pub async fn login<R>(api: &R, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: AuthApi + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    match api.login(&credentials).await {
        Ok(token) => Ok(AuthenticatedUser::from(token)),
        Err(ApiError::Unauthorized) => {
            log::warn!("Rejected sign-in for {}", credentials.email);
            Err(ServiceError::Form("Invalid email or password.".to_string()))
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            Err(err.into())
        }
    }
}

/// Creates a backend account and signs the new user in.
pub async fn register<R>(api: &R, form: RegisterForm) -> ServiceResult<AuthenticatedUser>
where
    R: AuthApi + ?Sized,
{
    let new_user = NewUser::try_from(form)?;

    let token = api.register(&new_user).await.map_err(|err| {
        log::error!("Failed to register {}: {err}", new_user.email);
        err
    })?;

    Ok(AuthenticatedUser::from(token))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::domain::types::{UserId, UserRole};
    use crate::domain::user::{TokenResponse, User};
    use crate::services::fixtures::stamp;

    fn token_response(role: UserRole) -> TokenResponse {
        TokenResponse {
            access_token: "access".into(),
            refresh_token: Some("refresh".into()),
            token_type: Some("bearer".into()),
            user: User {
                id: UserId::new(9).unwrap(),
                email: "q@example.com".into(),
                full_name: "Quinn".into(),
                role,
                is_active: true,
                created_at: stamp(),
            },
        }
    }

    #[actix_web::test]
    async fn login_stores_token_and_role() {
        let mut api = MockBackend::new();
        api.expect_login()
            .withf(|credentials| credentials.email == "q@example.com")
            .times(1)
            .returning(|_| Ok(token_response(UserRole::Quality)));

        let user = login(
            &api,
            LoginForm {
                email: "Q@example.com".into(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.token, "access");
        assert_eq!(user.role, UserRole::Quality);
    }

    #[actix_web::test]
    async fn wrong_password_becomes_form_error() {
        let mut api = MockBackend::new();
        api.expect_login()
            .returning(|_| Err(ApiError::Unauthorized));

        let result = login(
            &api,
            LoginForm {
                email: "q@example.com".into(),
                password: "nope".into(),
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn invalid_form_never_reaches_backend() {
        let mut api = MockBackend::new();
        api.expect_register().times(0);

        let result = register(
            &api,
            RegisterForm {
                email: "not-an-email".into(),
                full_name: "X".into(),
                password: "pw".into(),
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn register_surfaces_backend_detail() {
        let mut api = MockBackend::new();
        api.expect_register()
            .returning(|_| Err(ApiError::from_status(400, "Email already registered")));

        let result = register(
            &api,
            RegisterForm {
                email: "taken@example.com".into(),
                full_name: "Taken".into(),
                password: "pw".into(),
            },
        )
        .await;

        assert!(
            matches!(result, Err(ServiceError::Form(msg)) if msg == "Email already registered")
        );
    }
}
