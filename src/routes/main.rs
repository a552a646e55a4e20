use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::http::BackendClient;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, render_template, service_error_response};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match main_service::load_dashboard(&api).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "index");
            context.insert("stats", &data.stats);
            context.insert("activities", &data.activities);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, None),
    }
}
