//! HTTP handlers and the helpers they share.
//!
//! Handlers are generic over [`crate::repository::DashboardRepository`] and
//! registered through [`crate::configure`].

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::section::Section;
use crate::domain::types::StoreId;
use crate::models::config::ServerConfig;

pub mod api;
pub mod invites;
pub mod managers;
pub mod settings;
pub mod store;

/// Maps a flash level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Renders the template or answers `500` when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Context shared by every full page: alerts, theme and the navigation menu.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    section: Section,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("theme", &server_config.theme);
    context.insert("sections", &section.links());
    context.insert("current_section", section.slug());
    context.insert("current_section_label", section.label());
    context
}

/// Store the dashboard operates on.
pub(crate) fn configured_store(server_config: &ServerConfig) -> Result<StoreId, HttpResponse> {
    StoreId::new(server_config.store_id).map_err(|err| {
        log::error!("Configured store id is invalid: {err}");
        HttpResponse::InternalServerError().finish()
    })
}

/// Runs repository work on the blocking pool so simulated latency and
/// database I/O stay off the worker thread.
pub(crate) async fn run_blocking<F, T>(work: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    web::block(work).await.map_err(|err| {
        log::error!("Blocking task failed: {err}");
        HttpResponse::InternalServerError().finish()
    })
}
