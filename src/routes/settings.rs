//! Navigation shell.

use actix_web::{Responder, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::section::Section;
use crate::dto::managers::RosterState;
use crate::dto::store::StoreFormState;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};

pub const ROSTER_FRAGMENT_URL: &str = "/settings/managers/roster";
pub const STORE_FORM_FRAGMENT_URL: &str = "/settings/store/form";

/// Shown by the page script when a fragment request itself fails.
const ROSTER_FAILED_TEXT: &str = "Не удалось загрузить список менеджеров.";
const STORE_FORM_FAILED_TEXT: &str = "Не удалось загрузить данные магазина.";

#[derive(Deserialize)]
pub struct SettingsQuery {
    section: Option<String>,
}

pub async fn index() -> impl Responder {
    redirect("/settings")
}

/// Renders the shell with the selected panel. Panels backed by a fetch are
/// mounted in their loading state and filled in by their fragment route.
pub async fn show_settings(
    query: web::Query<SettingsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let section = Section::from_slug(query.section.as_deref());
    let context = shell_context(&flash_messages, &server_config, section, None);

    render_template(&tera, "settings/index.html", &context)
}

/// Shell context. A resolved store form replaces the loading panel.
pub(crate) fn shell_context(
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    section: Section,
    store_form: Option<&StoreFormState>,
) -> Context {
    let mut context = base_context(flash_messages, server_config, section);

    match section {
        Section::Store => match store_form {
            Some(state) => {
                context.insert("store_form", &state.fragment());
            }
            None => {
                context.insert("store_form", &StoreFormState::Loading.fragment());
                context.insert("fragment_url", STORE_FORM_FRAGMENT_URL);
                context.insert("fragment_failed_text", STORE_FORM_FAILED_TEXT);
            }
        },
        Section::Managers => {
            context.insert("roster", &RosterState::Loading.fragment());
            context.insert("fragment_url", ROSTER_FRAGMENT_URL);
            context.insert("fragment_failed_text", ROSTER_FAILED_TEXT);
        }
        Section::Ai | Section::Integrations => {}
    }

    context
}
