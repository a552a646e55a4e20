use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::BackendClient;
use crate::dto::nces::NceFilters;
use crate::forms::nces::{AddNceForm, NceUpdateForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{attachment, base_context, redirect, render_template, service_error_response};
use crate::services::{files as files_service, nces as nces_service};

#[get("/nces")]
pub async fn show_nces(
    params: web::Query<NceFilters>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match nces_service::load_nces_page(&api, params.into_inner(), server_config.items_per_page)
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "nces");
            context.insert("nces", &data.nces);
            context.insert("filters", &data.filters);
            context.insert("filter_query", &data.filter_query);
            context.insert("status_counts", &data.status_counts);
            context.insert("severity_counts", &data.severity_counts);
            context.insert("deliveries", &data.deliveries);

            render_template(&tera, "nces/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}

#[get("/nces/{nce_id}")]
pub async fn show_nce(
    nce_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match nces_service::load_nce_page(&api, &user, nce_id.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "nces");
            context.insert("nce", &data.nce);
            context.insert("delivery", &data.delivery);
            context.insert("can_review", &data.can_review);
            context.insert("can_edit", &data.can_edit);

            render_template(&tera, "nces/show.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/nces")),
    }
}

#[post("/nces/add")]
pub async fn add_nce(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<AddNceForm>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match nces_service::create_nce(&api, form).await {
        Ok(created) if created.upload_failed => {
            FlashMessage::warning(format!(
                "NCE \"{}\" reported, but its files could not be uploaded.",
                created.nce.title
            ))
            .send();
            redirect(&format!("/nces/{}", created.nce.id))
        }
        Ok(created) => {
            FlashMessage::success(format!(
                "NCE \"{}\" reported with {} file(s).",
                created.nce.title, created.attached
            ))
            .send();
            redirect("/nces")
        }
        Err(err) => service_error_response(&tera, err, Some("/nces")),
    }
}

#[post("/nces/{nce_id}/update")]
pub async fn update_nce(
    nce_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NceUpdateForm>,
) -> impl Responder {
    let nce_id = nce_id.into_inner();
    let back = format!("/nces/{nce_id}");
    let api = client.authorized(&user.token);

    match nces_service::update_nce(&api, &user, nce_id, form).await {
        Ok(_) => {
            FlashMessage::success("NCE updated.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(&tera, err, Some(&back)),
    }
}

#[get("/nces/{nce_id}/files/{file_id}")]
pub async fn download_nce_file(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (nce_id, file_id) = path.into_inner();
    let api = client.authorized(&user.token);

    match files_service::download_nce_file(&api, nce_id, file_id).await {
        Ok(download) => attachment(download, &format!("file-{file_id}")),
        Err(err) => service_error_response(&tera, err, Some(&format!("/nces/{nce_id}"))),
    }
}
