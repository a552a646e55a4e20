use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::http::BackendClient;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, render_template, service_error_response};
use crate::services::analytics as analytics_service;

#[get("/analytics")]
pub async fn show_analytics(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match analytics_service::load_analytics(&api).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "analytics");
            context.insert("summary", &data.summary);
            context.insert("nce_status_counts", &data.nce_statuses);

            render_template(&tera, "analytics/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}
