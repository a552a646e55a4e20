use actix_web::{HttpResponse, Responder, get, web};

use crate::api::http::BackendClient;
use crate::dto::api::LookupQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::services::{ServiceError, ServiceResult, api as api_service};

fn json_response<T: serde::Serialize>(result: ServiceResult<T>, what: &str) -> HttpResponse {
    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Forbidden(_)) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("Failed to list {what}: {err}");
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<LookupQuery>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let api = client.authorized(&user.token);
    let per_page = server_config.items_per_page;
    let result = api_service::list_clients(&api, params.into_inner(), per_page).await;
    json_response(result, "clients")
}

#[get("/v1/projects")]
pub async fn api_v1_projects(
    params: web::Query<LookupQuery>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let api = client.authorized(&user.token);
    let per_page = server_config.items_per_page;
    let result = api_service::list_project_names(&api, params.into_inner(), per_page).await;
    json_response(result, "projects")
}
