use actix_web::{Responder, web};
use actix_web_flash_messages::FlashMessage;
use tera::{Context, Tera};

use crate::forms::managers::DeleteManagerForm;
use crate::models::config::ServerConfig;
use crate::repository::DashboardRepository;
use crate::routes::{configured_store, redirect, render_template, run_blocking};
use crate::services::managers::{self as managers_service, DeleteOutcome};
use crate::services::ServiceError;

const MANAGERS_SECTION_URL: &str = "/settings?section=managers";

/// Roster panel fragment, resolved after the fetch completes.
pub async fn roster_fragment<R: DashboardRepository>(
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };
    let cap = server_config.manager_cap;

    let state = match run_blocking(move || {
        managers_service::load_roster(repo.get_ref(), store_id, cap)
    })
    .await
    {
        Ok(state) => state,
        Err(response) => return response,
    };

    let mut context = Context::new();
    context.insert("roster", &state.fragment());
    render_template(&tera, "managers/roster.html", &context)
}

pub async fn delete_manager<R: DashboardRepository>(
    manager_id: web::Path<i32>,
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<DeleteManagerForm>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };
    let manager_id = manager_id.into_inner();

    let result = match run_blocking(move || {
        managers_service::delete_manager(repo.get_ref(), store_id, manager_id, form)
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    match result {
        Ok(DeleteOutcome::Deleted) => {
            FlashMessage::success("Менеджер удалён.").send();
        }
        Ok(DeleteOutcome::Cancelled) => {}
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Менеджер не найден.").send();
        }
        Err(err) => {
            log::error!("Failed to delete manager {manager_id}: {err}");
            FlashMessage::error("Ошибка при удалении менеджера.").send();
        }
    }
    redirect(MANAGERS_SECTION_URL)
}

pub async fn invite_manager<R: DashboardRepository>(
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };
    let public_url = server_config.public_base().to_string();

    let result = match run_blocking(move || {
        managers_service::issue_invite(repo.get_ref(), store_id, &public_url)
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    match result {
        Ok(link) => {
            FlashMessage::success(format!("Ссылка приглашения сгенерирована: {}", link.url))
                .send();
        }
        Err(err) => {
            log::error!("Failed to issue invite: {err}");
            FlashMessage::error("Ошибка при создании приглашения.").send();
        }
    }
    redirect(MANAGERS_SECTION_URL)
}
