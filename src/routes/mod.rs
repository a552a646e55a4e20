//! HTTP handlers and the helpers they share.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentDisposition};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::file::FileDownload;
use crate::domain::types::{DeliveryStatus, NceSeverity, NceStatus, SortOrder, SurveyType};
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod analytics;
pub mod api;
pub mod auth;
pub mod deliveries;
pub mod main;
pub mod nces;
pub mod notifications;
pub mod projects;
pub mod surveys;

/// Maps a flash level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context with the pending flash alerts only, for anonymous pages.
pub fn alerts_context(flash_messages: &IncomingFlashMessages) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context
}

/// Context shared by every signed-in page: alerts, the user, the active menu
/// entry, and the badge and label tables for the status enums.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let mut context = alerts_context(flash_messages);
    context.insert("current_user", &user.without_token());
    context.insert("current_page", current_page);

    context.insert(
        "delivery_badges",
        &DeliveryStatus::ALL
            .iter()
            .map(|s| (s.as_str(), s.badge_class()))
            .collect::<BTreeMap<_, _>>(),
    );
    context.insert(
        "severity_badges",
        &NceSeverity::ALL
            .iter()
            .map(|s| (s.as_str(), s.badge_class()))
            .collect::<BTreeMap<_, _>>(),
    );
    context.insert(
        "nce_status_badges",
        &NceStatus::ALL
            .iter()
            .map(|s| (s.as_str(), s.badge_class()))
            .collect::<BTreeMap<_, _>>(),
    );

    context.insert(
        "delivery_statuses",
        &options(DeliveryStatus::ALL, |s| (s.as_str(), s.label())),
    );
    context.insert(
        "severities",
        &options(NceSeverity::ALL, |s| (s.as_str(), s.label())),
    );
    context.insert(
        "nce_statuses",
        &options(NceStatus::ALL, |s| (s.as_str(), s.label())),
    );
    context.insert(
        "survey_types",
        &options(SurveyType::ALL, |s| (s.as_str(), s.label())),
    );
    context.insert(
        "sort_orders",
        &options(SortOrder::ALL, |s| (s.as_str(), s.label())),
    );

    context
}

fn options<T: Copy>(
    values: &[T],
    pair: impl Fn(T) -> (&'static str, &'static str),
) -> Vec<(&'static str, &'static str)> {
    values.iter().map(|&value| pair(value)).collect()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders `main/error.html` with the given status.
pub fn error_page(tera: &Tera, status: StatusCode, message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("message", message);

    match tera.render("main/error.html", &context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html")
            .body(body),
        Err(err) => {
            log::error!("Failed to render the error page: {err}");
            HttpResponse::build(status).finish()
        }
    }
}

/// Turns a failed service call into a response.
///
/// With `back` set, recoverable errors are flashed and the browser is sent
/// there; without it (pages that would redirect to themselves) they are
/// rendered in place.
pub fn service_error_response(tera: &Tera, err: ServiceError, back: Option<&str>) -> HttpResponse {
    let (status, message) = match err {
        ServiceError::Unauthorized => return HttpResponse::Unauthorized().finish(),
        ServiceError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            "The requested record was not found.".to_string(),
        ),
        ServiceError::Form(message) => (StatusCode::BAD_REQUEST, message),
        err => {
            log::error!("Backend request failed: {err}");
            return error_page(
                tera,
                StatusCode::BAD_GATEWAY,
                "The quality backend is unavailable. Please try again later.",
            );
        }
    };

    match back {
        Some(location) => {
            FlashMessage::error(message).send();
            redirect(location)
        }
        None => error_page(tera, status, &message),
    }
}

/// Streams a proxied file back as an attachment.
pub fn attachment(download: FileDownload, fallback_name: &str) -> HttpResponse {
    let filename = download
        .filename
        .unwrap_or_else(|| fallback_name.to_string());
    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition::attachment(filename))
        .body(download.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/deliveries/4");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/deliveries/4"
        );
    }

    #[test]
    fn attachment_falls_back_to_given_name() {
        let response = attachment(
            FileDownload {
                filename: None,
                content_type: None,
                bytes: b"%PDF".to_vec(),
            },
            "file-3",
        );

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("file-3"));
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }
}
