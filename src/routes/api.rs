//! JSON endpoints mirroring the fetches behind the HTML panels.

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;

use crate::domain::types::MarketplaceToken;
use crate::dto::managers::ManagerRow;
use crate::dto::store::StoreFormFields;
use crate::models::config::ServerConfig;
use crate::repository::DashboardRepository;
use crate::routes::{configured_store, run_blocking};
use crate::services::managers as managers_service;
use crate::services::store as store_service;
use crate::services::FetchError;

#[derive(Serialize)]
struct ManagersResponse {
    managers: Vec<ManagerRow>,
    count: usize,
    cap: usize,
}

/// Store profile with tokens reduced to masked previews.
#[derive(Serialize)]
struct StoreResponse {
    store_name: String,
    description: String,
    ozon_token: Option<String>,
    wb_token: Option<String>,
}

impl From<StoreFormFields> for StoreResponse {
    fn from(fields: StoreFormFields) -> Self {
        let mask = |value: &str| MarketplaceToken::new(value).ok().map(|t| t.preview());
        Self {
            ozon_token: mask(&fields.ozon_token),
            wb_token: mask(&fields.wb_token),
            store_name: fields.store_name,
            description: fields.description,
        }
    }
}

#[derive(Serialize)]
struct FetchFailure {
    error: String,
    retryable: bool,
}

fn fetch_failure(err: &FetchError) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(FetchFailure {
        error: err.to_string(),
        retryable: err.is_recoverable(),
    })
}

pub async fn api_v1_managers<R: DashboardRepository>(
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };
    let cap = server_config.manager_cap;

    match run_blocking(move || managers_service::fetch_roster(repo.get_ref(), store_id, cap)).await
    {
        Ok(Ok(view)) => HttpResponse::Ok().json(ManagersResponse {
            count: view.count(),
            cap: view.cap,
            managers: view.managers,
        }),
        Ok(Err(err)) => fetch_failure(&err),
        Err(response) => response,
    }
}

/// Registered store profile. Toggles are not part of it.
pub async fn api_v1_store<R: DashboardRepository>(
    repo: web::Data<R>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let store_id = match configured_store(&server_config) {
        Ok(store_id) => store_id,
        Err(response) => return response,
    };

    match run_blocking(move || store_service::fetch_store_fields(repo.get_ref(), store_id)).await {
        Ok(Ok(fields)) => HttpResponse::Ok().json(StoreResponse::from(fields)),
        Ok(Err(err)) => fetch_failure(&err),
        Err(response) => response,
    }
}
