use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::http::BackendClient;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::notifications as notifications_service;

#[get("/notifications")]
pub async fn show_notifications(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match notifications_service::list_notifications(&api).await {
        Ok(notifications) => {
            let unread = notifications.iter().filter(|n| !n.is_read).count();
            let mut context = base_context(&flash_messages, &user, "notifications");
            context.insert("notifications", &notifications);
            context.insert("unread", &unread);

            render_template(&tera, "notifications/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}

#[post("/notifications/{notification_id}/read")]
pub async fn mark_notification_read(
    notification_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match notifications_service::mark_read(&api, notification_id.into_inner()).await {
        Ok(()) => redirect("/notifications"),
        Err(err) => service_error_response(&tera, err, Some("/notifications")),
    }
}
