use std::time::{Duration, Instant};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use nikosale_admin::domain::types::StoreId;
use nikosale_admin::models::config::{
    BackendKind, FixtureConfig, MIN_SECRET_LENGTH, ServerConfig, ThemeConfig,
};
use nikosale_admin::repository::fixture::{FixtureLatency, FixtureRepository, STATIC_INVITE_CODE};
use nikosale_admin::{configure, flash_framework};
use tera::Tera;

fn test_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 8080,
        templates_dir: "templates/**/*".into(),
        secret: "s".repeat(MIN_SECRET_LENGTH),
        public_url: "https://shop.example.com/".into(),
        backend: BackendKind::Fixture,
        database_url: String::new(),
        token_key: String::new(),
        store_id: 1,
        manager_cap: 5,
        allowed_origin: None,
        theme: ThemeConfig::default(),
        fixture: FixtureConfig::default(),
    }
}

fn seeded(latency: FixtureLatency) -> FixtureRepository {
    FixtureRepository::seeded(StoreId::new(1).unwrap(), latency).unwrap()
}

macro_rules! test_app {
    ($repo:expr) => {{
        let config = test_config();
        test::init_service(
            App::new()
                .wrap(flash_framework(&config.secret))
                .configure(configure::<FixtureRepository>)
                .app_data(web::Data::new(Tera::new("templates/**/*").unwrap()))
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(config)),
        )
        .await
    }};
}

async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
    let body = test::read_body(response).await;
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &actix_web::dev::ServiceResponse) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_index_redirects_to_settings() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings");
}

#[actix_web::test]
async fn test_settings_defaults_to_store_section() {
    let app = test_app!(seeded(FixtureLatency::none()));

    for uri in ["/settings", "/settings?section=unknown"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("id=\"panel-store\""));
        assert!(body.contains("Загрузка данных магазина..."));
        assert!(body.contains("data-fragment="));
        assert!(body.contains("data-failed-text=\"Не удалось загрузить данные магазина.\""));
    }
}

#[actix_web::test]
async fn test_managers_section_mounts_loading_roster() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::get()
        .uri("/settings?section=managers")
        .to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("Загрузка списка менеджеров..."));
    assert!(body.contains("data-fragment="));
    assert!(body.contains("data-failed-text=\"Не удалось загрузить список менеджеров.\""));
    assert!(!body.contains("Иван Петров"));
}

#[actix_web::test]
async fn test_placeholder_sections_render() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::get().uri("/settings?section=ai").to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("id=\"panel-ai\""));
    assert!(body.contains("Раздел находится в разработке."));
}

#[actix_web::test]
async fn test_roster_fragment_waits_for_fetch() {
    let app = test_app!(seeded(FixtureLatency::from_millis(1000, 0, 0)));

    let started = Instant::now();
    let request = test::TestRequest::get()
        .uri("/settings/managers/roster")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert_eq!(body.matches("data-manager-id=").count(), 2);
    assert!(body.contains("Иван Петров"));
    assert!(body.contains("olga@example.com"));
    assert!(body.contains("2 из 5"));
    assert!(body.contains("Вы уверены, что хотите удалить этого менеджера?"));
}

#[actix_web::test]
async fn test_empty_roster_fragment() {
    let repo = FixtureRepository::empty(StoreId::new(1).unwrap(), FixtureLatency::none());
    let app = test_app!(repo);

    let request = test::TestRequest::get()
        .uri("/settings/managers/roster")
        .to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("Пока нет менеджеров"));
    assert!(body.contains("0 из 5"));
}

#[actix_web::test]
async fn test_roster_fragment_offers_retry_when_unavailable() {
    let repo = seeded(FixtureLatency::none());
    repo.set_unavailable(true).unwrap();
    let app = test_app!(repo);

    let request = test::TestRequest::get()
        .uri("/settings/managers/roster")
        .to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("Не удалось загрузить список менеджеров."));
    assert!(body.contains("data-retry"));
    assert!(!body.contains("из 5"));
}

#[actix_web::test]
async fn test_store_form_fragment_shows_fixture_values() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::get()
        .uri("/settings/store/form")
        .to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("Регистрация магазина"));
    assert!(body.contains("value=\"ООО Ромашка\""));
    assert!(body.contains("Магазин товаров для дома"));
    assert!(body.contains("value=\"sample-ozon-token\""));
    assert!(body.contains("Зарегистрировать"));
}

#[actix_web::test]
async fn test_submit_store_reports_success() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::post()
        .uri("/settings/store")
        .set_form([
            ("store_name", "ООО Лютик"),
            ("description", ""),
            ("ozon_token", ""),
            ("wb_token", "wb-token"),
            ("complaint", "on"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Магазин успешно зарегистрирован!"));
    assert!(body.contains("value=\"ООО Лютик\""));
    assert!(body.contains("name=\"complaint\" checked"));
    assert!(!body.contains("name=\"unclear\" checked"));
}

#[actix_web::test]
async fn test_submit_store_without_name_reports_error() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::post()
        .uri("/settings/store")
        .set_form([("store_name", "  ")])
        .to_request();
    let body = body_text(test::call_service(&app, request).await).await;

    assert!(body.contains("Ошибка при регистрации"));
    assert!(!body.contains("Магазин успешно зарегистрирован!"));
}

#[actix_web::test]
async fn test_delete_manager_requires_confirmation() {
    let repo = seeded(FixtureLatency::none());
    let app = test_app!(repo.clone());

    let request = test::TestRequest::post()
        .uri("/managers/1/delete")
        .set_form([("confirmed", "false")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?section=managers");

    let request = test::TestRequest::get()
        .uri("/api/v1/managers")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(json["count"], 2);

    let request = test::TestRequest::post()
        .uri("/managers/1/delete")
        .set_form([("confirmed", "true")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let request = test::TestRequest::get()
        .uri("/api/v1/managers")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["managers"][0]["name"], "Ольга Смирнова");
}

#[actix_web::test]
async fn test_invite_manager_redirects_to_roster() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::post()
        .uri("/managers/invite")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?section=managers");
}

#[actix_web::test]
async fn test_api_store_masks_tokens() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::get().uri("/api/v1/store").to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(json["store_name"], "ООО Ромашка");
    let preview = json["ozon_token"].as_str().unwrap();
    assert_ne!(preview, "sample-ozon-token");
    assert!(!preview.contains("ozon"));
}

#[actix_web::test]
async fn test_api_reports_unavailable_source() {
    let repo = seeded(FixtureLatency::none());
    repo.set_unavailable(true).unwrap();
    let app = test_app!(repo);

    for uri in ["/api/v1/managers", "/api/v1/store"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(json["retryable"], true);
    }
}

#[actix_web::test]
async fn test_invite_page() {
    let app = test_app!(seeded(FixtureLatency::none()));

    let request = test::TestRequest::get()
        .uri(&format!("/invite/{STATIC_INVITE_CODE}"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Присоединиться"));

    let request = test::TestRequest::get().uri("/invite/unknown").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Приглашение не найдено."));
}

#[actix_web::test]
async fn test_accept_invite_adds_manager() {
    let repo = seeded(FixtureLatency::none());
    let app = test_app!(repo);

    let request = test::TestRequest::post()
        .uri(&format!("/invite/{STATIC_INVITE_CODE}"))
        .set_form([("name", "Пётр Иванов"), ("email", "petr@example.com")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?section=managers");

    let request = test::TestRequest::get()
        .uri("/api/v1/managers")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(json["count"], 3);
}
