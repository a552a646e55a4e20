use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::BackendClient;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::middleware::SIGN_IN_PATH;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{alerts_context, redirect, render_template};
use crate::services::{ServiceError, ServiceResult, auth as auth_service};

#[get("/auth/login")]
pub async fn show_login(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    // Reaching the form means the stored session is no longer usable.
    if let Some(identity) = identity {
        identity.logout();
    }

    let context = alerts_context(&flash_messages);
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    client: web::Data<BackendClient>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let result = auth_service::login(client.get_ref(), form).await;
    sign_in(&request, result, SIGN_IN_PATH)
}

#[get("/auth/register")]
pub async fn show_register(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = alerts_context(&flash_messages);
    render_template(&tera, "auth/register.html", &context)
}

#[post("/auth/register")]
pub async fn register(
    request: HttpRequest,
    client: web::Data<BackendClient>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let result = auth_service::register(client.get_ref(), form).await;
    sign_in(&request, result, "/auth/register")
}

#[post("/auth/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect(SIGN_IN_PATH)
}

fn sign_in(
    request: &HttpRequest,
    result: ServiceResult<AuthenticatedUser>,
    back: &str,
) -> HttpResponse {
    let user = match result {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect(back);
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Sign-in is unavailable right now. Please try again later.")
                .send();
            return redirect(back);
        }
    };

    match user.login(request) {
        Ok(_) => {
            FlashMessage::success(format!("Welcome, {}.", user.display_name())).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to store the session of {}: {err}", user.email);
            FlashMessage::error("Could not start the session.").send();
            redirect(back)
        }
    }
}
