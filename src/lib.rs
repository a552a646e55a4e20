#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_multipart::form::MultipartFormConfig;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::http::BackendClient;
#[cfg(feature = "server")]
use crate::domain::types::UserRole;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::analytics::show_analytics;
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_clients, api_v1_projects};
#[cfg(feature = "server")]
use crate::routes::auth::{login, logout, register, show_login, show_register};
#[cfg(feature = "server")]
use crate::routes::deliveries::{
    add_delivery, delete_delivery_file, download_delivery_file, show_deliveries, show_delivery,
    update_delivery_status, upload_delivery_files,
};
#[cfg(feature = "server")]
use crate::routes::main::show_index;
#[cfg(feature = "server")]
use crate::routes::nces::{add_nce, download_nce_file, show_nce, show_nces, update_nce};
#[cfg(feature = "server")]
use crate::routes::notifications::{mark_notification_read, show_notifications};
#[cfg(feature = "server")]
use crate::routes::projects::{add_project, show_project, show_projects};
#[cfg(feature = "server")]
use crate::routes::surveys::{add_survey, show_surveys};

pub mod domain;
pub mod pagination;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Roles allowed to review deliveries and triage non-conformities.
#[cfg(feature = "server")]
pub const REVIEW_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Quality];

/// Roles allowed to author deliveries and their attachments.
#[cfg(feature = "server")]
pub const AUTHOR_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Quality, UserRole::Producer];

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = BackendClient::new(&server_config.api_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build the backend client: {e}")))?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let upload_limit = server_config.upload_limit_mb * 1024 * 1024;
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Serving the dashboard on {}:{} against {}",
        server_config.address,
        server_config.port,
        backend.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(server_config.cookie_secure)
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_login)
            .service(login)
            .service(show_register)
            .service(register)
            .service(
                web::scope("/api")
                    .service(api_v1_clients)
                    .service(api_v1_projects),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_projects)
                    .service(add_project)
                    .service(show_project)
                    .service(show_deliveries)
                    .service(add_delivery)
                    .service(show_delivery)
                    .service(update_delivery_status)
                    .service(upload_delivery_files)
                    .service(download_delivery_file)
                    .service(delete_delivery_file)
                    .service(show_nces)
                    .service(add_nce)
                    .service(show_nce)
                    .service(update_nce)
                    .service(download_nce_file)
                    .service(show_surveys)
                    .service(add_survey)
                    .service(show_analytics)
                    .service(show_notifications)
                    .service(mark_notification_read)
                    .service(logout),
            )
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(upload_limit),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(backend.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
