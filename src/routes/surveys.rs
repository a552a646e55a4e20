use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::BackendClient;
use crate::dto::surveys::SurveyFilters;
use crate::forms::surveys::AddSurveyForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::surveys as surveys_service;

#[get("/surveys")]
pub async fn show_surveys(
    params: web::Query<SurveyFilters>,
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match surveys_service::load_surveys_page(
        &api,
        params.into_inner(),
        server_config.items_per_page,
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "surveys");
            context.insert("surveys", &data.surveys);
            context.insert("filters", &data.filters);
            context.insert("filter_query", &data.filter_query);
            context.insert("deliveries", &data.deliveries);

            render_template(&tera, "surveys/index.html", &context)
        }
        Err(err) => service_error_response(&tera, err, Some("/")),
    }
}

#[post("/surveys/add")]
pub async fn add_survey(
    user: AuthenticatedUser,
    client: web::Data<BackendClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddSurveyForm>,
) -> impl Responder {
    let api = client.authorized(&user.token);

    match surveys_service::create_survey(&api, form).await {
        Ok(survey) => {
            FlashMessage::success(format!("{} survey recorded.", survey.survey_type.label()))
                .send();
            redirect("/surveys")
        }
        Err(err) => service_error_response(&tera, err, Some("/surveys")),
    }
}
