#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::crypto::TokenCipher;
#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::domain::types::StoreId;
#[cfg(feature = "server")]
use crate::models::config::{BackendKind, ServerConfig};
#[cfg(feature = "server")]
use crate::repository::fixture::{FixtureLatency, FixtureRepository};
#[cfg(feature = "server")]
use crate::repository::{DashboardRepository, DieselRepository};
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_managers, api_v1_store};
#[cfg(feature = "server")]
use crate::routes::invites::{accept_invite, show_invite};
#[cfg(feature = "server")]
use crate::routes::managers::{delete_manager, invite_manager, roster_fragment};
#[cfg(feature = "server")]
use crate::routes::settings::{index, show_settings};
#[cfg(feature = "server")]
use crate::routes::store::{store_form_fragment, submit_store};

pub mod crypto;
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Loads `config/default.yaml`, the `APP_ENV` profile and `APP_*` variables.
#[cfg(feature = "server")]
pub fn load_server_config() -> Result<ServerConfig, ::config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    ::config::Config::builder()
        .add_source(::config::File::with_name("config/default"))
        .add_source(::config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(::config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}

/// Flash message framework backed by signed cookies.
#[cfg(feature = "server")]
pub fn flash_framework(secret: &str) -> FlashMessagesFramework {
    let message_store = CookieMessageStore::builder(Key::from(secret.as_bytes())).build();
    FlashMessagesFramework::builder(message_store).build()
}

#[cfg(feature = "server")]
fn build_cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        None => Cors::permissive(),
    }
}

/// Registers every dashboard route for the given data source.
#[cfg(feature = "server")]
pub fn configure<R: DashboardRepository>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/settings", web::get().to(show_settings))
        .route("/settings/managers/roster", web::get().to(roster_fragment::<R>))
        .route("/settings/store/form", web::get().to(store_form_fragment::<R>))
        .route("/settings/store", web::post().to(submit_store::<R>))
        .route("/managers/invite", web::post().to(invite_manager::<R>))
        .route(
            "/managers/{manager_id}/delete",
            web::post().to(delete_manager::<R>),
        )
        .service(
            web::resource("/invite/{code}")
                .route(web::get().to(show_invite::<R>))
                .route(web::post().to(accept_invite::<R>)),
        )
        .service(
            web::scope("/api/v1")
                .route("/managers", web::get().to(api_v1_managers::<R>))
                .route("/store", web::get().to(api_v1_store::<R>)),
        );
}

/// Builds the data source selected by the configuration and serves it.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    match server_config.backend {
        BackendKind::Fixture => {
            let store_id = StoreId::new(server_config.store_id)
                .map_err(|e| std::io::Error::other(format!("Invalid store id: {e}")))?;
            let fixture = &server_config.fixture;
            let latency = FixtureLatency::from_millis(
                fixture.managers_latency_ms,
                fixture.profile_latency_ms,
                fixture.submit_latency_ms,
            );
            let repo = FixtureRepository::seeded(store_id, latency)
                .map_err(|e| std::io::Error::other(format!("Failed to seed fixture data: {e}")))?;
            log::info!("Serving fixture data for store {store_id}");
            serve(server_config, repo).await
        }
        BackendKind::Database => {
            let cipher = TokenCipher::new(&server_config.token_key)
                .map_err(|e| std::io::Error::other(format!("Invalid token key: {e}")))?;
            // Establish Diesel connection pool for the SQLite database.
            let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            serve(server_config, DieselRepository::new(pool, cipher)).await
        }
    }
}

/// Builds and runs the Actix-Web HTTP server on top of `repo`.
#[cfg(feature = "server")]
pub async fn serve<R: DashboardRepository>(
    server_config: ServerConfig,
    repo: R,
) -> std::io::Result<()> {
    let message_framework = flash_framework(&server_config.secret);

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(server_config.allowed_origin.as_deref()))
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure::<R>)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
