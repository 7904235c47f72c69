use actix_web::{Responder, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::domain::section::Section;
use crate::forms::store::StoreRegistrationForm;
use crate::models::config::ServerConfig;
use crate::repository::DashboardRepository;
use crate::routes::settings::shell_context;
use crate::routes::{configured_store, render_template, run_blocking};
use crate::services::store as store_service;

/// Store form fragment, resolved after the profile fetch completes.
pub async fn store_form_fragment<R: DashboardRepository>(
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };

    let state = match run_blocking(move || {
        store_service::load_store_form(repo.get_ref(), store_id)
    })
    .await
    {
        Ok(state) => state,
        Err(response) => return response,
    };

    let mut context = Context::new();
    context.insert("store_form", &state.fragment());
    render_template(&tera, "store/form.html", &context)
}

/// Submits the registration and re-renders the shell with the outcome.
pub async fn submit_store<R: DashboardRepository>(
    repo: web::Data<R>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<StoreRegistrationForm>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };

    let state = match run_blocking(move || {
        store_service::submit_store_form(repo.get_ref(), store_id, form)
    })
    .await
    {
        Ok(state) => state,
        Err(response) => return response,
    };

    let context = shell_context(&flash_messages, &server_config, Section::Store, Some(&state));
    render_template(&tera, "settings/index.html", &context)
}
