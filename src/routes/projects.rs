use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::BackendClient;
use crate::dto::projects::{ProjectFilters, ProjectPageQuery};
use crate::forms::projects::AddProjectForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::projects as projects_service;

#[get("/projects")]
pub async fn show_projects(
    params: web::Query<ProjectFilters>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match projects_service::load_projects_page(
        &api,
        &user,
        params.into_inner(),
        server_config.items_per_page,
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "projects");
            context.insert("projects", &data.projects);
            context.insert("filters", &data.filters);
            context.insert("filter_query", &data.filter_query);
            context.insert("clients", &data.clients);
            context.insert("can_create", &data.can_create);

            render_template(&tera, "projects/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}

#[get("/projects/{project_id}")]
pub async fn show_project(
    project_id: web::Path<i32>,
    params: web::Query<ProjectPageQuery>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match projects_service::load_project_page(
        &api,
        &user,
        project_id.into_inner(),
        params.into_inner(),
        server_config.items_per_page,
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "projects");
            context.insert("project", &data.project);
            context.insert("deliveries", &data.deliveries);
            context.insert("can_add_delivery", &data.can_add_delivery);

            render_template(&tera, "projects/show.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/projects")),
    }
}

#[post("/projects/add")]
pub async fn add_project(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddProjectForm>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match projects_service::create_project(&api, &user, form).await {
        Ok(project) => {
            FlashMessage::success(format!("Project \"{}\" created.", project.name)).send();
            redirect("/projects")
        }
        Err(err) => service_error_response(&tera, err, Some("/projects")),
    }
}
