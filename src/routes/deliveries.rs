use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::BackendClient;
use crate::dto::deliveries::DeliveryFilters;
use crate::forms::deliveries::{AddDeliveryForm, DeliveryStatusForm, UploadFilesForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{attachment, base_context, redirect, render_template, service_error_response};
use crate::services::{deliveries as deliveries_service, files as files_service};

#[get("/deliveries")]
pub async fn show_deliveries(
    params: web::Query<DeliveryFilters>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match deliveries_service::load_deliveries_page(
        &api,
        &user,
        params.into_inner(),
        server_config.items_per_page,
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "deliveries");
            context.insert("deliveries", &data.deliveries);
            context.insert("filters", &data.filters);
            context.insert("filter_query", &data.filter_query);
            context.insert("projects", &data.projects);
            context.insert("can_create", &data.can_create);

            render_template(&tera, "deliveries/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}

#[get("/deliveries/{delivery_id}")]
pub async fn show_delivery(
    delivery_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match deliveries_service::load_delivery_page(&api, &user, delivery_id.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "deliveries");
            context.insert("delivery", &data.delivery);
            context.insert("project", &data.project);
            context.insert("nces", &data.nces);
            context.insert("surveys", &data.surveys);
            context.insert("files", &data.files);
            context.insert("can_review", &data.can_review);
            context.insert("can_upload", &data.can_upload);

            render_template(&tera, "deliveries/show.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/deliveries")),
    }
}

#[post("/deliveries/add")]
pub async fn add_delivery(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddDeliveryForm>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match deliveries_service::create_delivery(&api, &user, form).await {
        Ok(delivery) => {
            FlashMessage::success(format!("Delivery \"{}\" created.", delivery.title)).send();
            redirect("/deliveries")
        }
        Err(err) => service_error_response(&tera, err, Some("/deliveries")),
    }
}

#[post("/deliveries/{delivery_id}/status")]
pub async fn update_delivery_status(
    delivery_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<DeliveryStatusForm>,
) -> impl Responder {
    let delivery_id = delivery_id.into_inner();
    let back = format!("/deliveries/{delivery_id}");
    let api = client.authorized(&user.token);

    match deliveries_service::update_delivery_status(&api, &user, delivery_id, form).await {
        Ok(delivery) => {
            FlashMessage::success(format!("Delivery marked as {}.", delivery.status.label()))
                .send();
            redirect(&back)
        }
        Err(err) => service_error_response(&tera, err, Some(&back)),
    }
}

#[post("/deliveries/{delivery_id}/files")]
pub async fn upload_delivery_files(
    delivery_id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<UploadFilesForm>,
) -> impl Responder {
    let delivery_id = delivery_id.into_inner();
    let back = format!("/deliveries/{delivery_id}");
    let api = client.authorized(&user.token);

    match files_service::upload_delivery_files(&api, &user, delivery_id, form).await {
        Ok(files) => {
            FlashMessage::success(format!("{} file(s) uploaded.", files.len())).send();
            redirect(&back)
        }
        Err(err) => service_error_response(&tera, err, Some(&back)),
    }
}

#[get("/deliveries/{delivery_id}/files/{file_id}")]
pub async fn download_delivery_file(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (delivery_id, file_id) = path.into_inner();
    let api = client.authorized(&user.token);

    match files_service::download_delivery_file(&api, delivery_id, file_id).await {
        Ok(download) => attachment(download, &format!("file-{file_id}")),
        Err(err) => {
            service_error_response(&tera, err, Some(&format!("/deliveries/{delivery_id}")))
        }
    }
}

#[post("/deliveries/{delivery_id}/files/{file_id}/delete")]
pub async fn delete_delivery_file(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (delivery_id, file_id) = path.into_inner();
    let back = format!("/deliveries/{delivery_id}");
    let api = client.authorized(&user.token);

    match files_service::delete_delivery_file(&api, &user, delivery_id, file_id).await {
        Ok(()) => {
            FlashMessage::success("File deleted.").send();
            redirect(&back)
        }
        Err(err) => service_error_response(&tera, err, Some(&back)),
    }
}
