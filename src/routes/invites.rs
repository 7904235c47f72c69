use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::section::Section;
use crate::forms::invites::AcceptInviteForm;
use crate::models::config::ServerConfig;
use crate::repository::DashboardRepository;
use crate::routes::{base_context, redirect, render_template, run_blocking};
use crate::services::invites as invites_service;
use crate::services::ServiceError;

/// Invite landing page with the registration form when the code is valid.
pub async fn show_invite<R: DashboardRepository>(
    code: web::Path<String>,
    repo: web::Data<R>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let code = code.into_inner();
    let lookup = code.clone();

    let result = match run_blocking(move || {
        invites_service::check_invite(repo.get_ref(), &lookup)
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    let mut context = base_context(&flash_messages, &server_config, Section::Managers);
    context.insert("code", &code);

    match result {
        Ok(check) => {
            context.insert("status", &check.status);
            context.insert("expires_at", &check.token.expires_at().format("%d.%m.%Y").to_string());
            render_template(&tera, "invites/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            context.insert("status", "not_found");
            let mut response = render_template(&tera, "invites/index.html", &context);
            if response.status().is_success() {
                *response.status_mut() = StatusCode::NOT_FOUND;
            }
            response
        }
        Err(err) => {
            log::error!("Failed to check invite {code}: {err}");
            context.insert("status", "unavailable");
            let mut response = render_template(&tera, "invites/index.html", &context);
            if response.status().is_success() {
                *response.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
            }
            response
        }
    }
}

pub async fn accept_invite<R: DashboardRepository>(
    code: web::Path<String>,
    repo: web::Data<R>,
    web::Form(form): web::Form<AcceptInviteForm>,
) -> impl Responder {
    let code = code.into_inner();
    let lookup = code.clone();
    let invite_url = format!("/invite/{code}");

    let result = match run_blocking(move || {
        invites_service::accept_invite(repo.get_ref(), &lookup, form)
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };

    match result {
        Ok(manager) => {
            log::info!("Manager {} joined store {}", manager.email, manager.store_id);
            FlashMessage::success("Вы зарегистрированы как менеджер магазина.").send();
            redirect("/settings?section=managers")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&invite_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Приглашение не найдено.").send();
            redirect(&invite_url)
        }
        Err(err) => {
            log::error!("Failed to accept invite {code}: {err}");
            FlashMessage::error("Ошибка при регистрации по приглашению.").send();
            redirect(&invite_url)
        }
    }
}
