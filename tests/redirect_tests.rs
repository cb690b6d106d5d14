//! Redirect tests
//!
//! The critical path: short code → 301 redirect, click counted
//! asynchronously.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tokio::time::Duration;

use snaplink::analytics::{ClickManager, ClickSink};
use snaplink::config::AppConfig;
use snaplink::services::app_routes;
use snaplink::storage::{MemoryStorage, Storage, UrlRecord};
use snaplink::structs::{AnalyticsResponse, UrlResponse};

fn setup() -> (Arc<MemoryStorage>, Arc<dyn Storage>, ClickManager, AppConfig) {
    let memory = Arc::new(MemoryStorage::new());
    let storage: Arc<dyn Storage> = memory.clone();
    let clicks = ClickManager::new(
        memory.clone() as Arc<dyn ClickSink>,
        Duration::from_secs(3600),
        usize::MAX,
    );
    (memory, storage, clicks, AppConfig::default())
}

macro_rules! init_app {
    ($storage:expr, $clicks:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($clicks.clone()))
                .app_data(web::Data::new($config.clone()))
                .configure(app_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_redirect_moved_permanently() {
    let (_memory, storage, clicks, config) = setup();
    storage
        .insert(UrlRecord::new("https://example.com/target", "abc123"))
        .await;
    let app = init_app!(storage, clicks, config);

    let resp = test::call_service(&app, TestRequest::get().uri("/abc123").to_request()).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/target"
    );
}

#[actix_web::test]
async fn test_unknown_code_is_not_found() {
    let (_memory, storage, clicks, config) = setup();
    let app = init_app!(storage, clicks, config);

    let resp = test::call_service(&app, TestRequest::get().uri("/nope99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 重复请求行为不变
    let resp = test::call_service(&app, TestRequest::get().uri("/nope99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_redirect_response_does_not_wait_for_flush() {
    let (_memory, storage, clicks, config) = setup();
    storage
        .insert(UrlRecord::new("https://example.com", "abc123"))
        .await;
    let app = init_app!(storage, clicks, config);

    let resp = test::call_service(&app, TestRequest::get().uri("/abc123").to_request()).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);

    // 响应返回时点击仍在缓冲区，存储里还是 0
    assert_eq!(storage.get("abc123").await.unwrap().access_count, 0);
    assert_eq!(clicks.pending("abc123"), 1);

    clicks.flush().await;
    assert_eq!(storage.get("abc123").await.unwrap().access_count, 1);
}

/// End-to-end scenario: create, redirect three times, drain, check
/// analytics.
#[actix_web::test]
async fn test_create_redirect_analytics_round_trip() {
    let (_memory, storage, clicks, config) = setup();
    let app = init_app!(storage, clicks, config);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "url": "https://example.com/a" }))
        .to_request();
    let created: UrlResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.short_code.len(), 6);

    for _ in 0..3 {
        let req = TestRequest::get()
            .uri(&format!("/{}", created.short_code))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "https://example.com/a"
        );
    }

    // 等待异步计数落盘
    clicks.flush().await;

    let req = TestRequest::get().uri("/api/analytics").to_request();
    let analytics: AnalyticsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(analytics.total_urls, 1);
    assert_eq!(analytics.total_clicks, 3);
    assert_eq!(analytics.urls[0].short_code, created.short_code);
    assert_eq!(analytics.urls[0].access_count, 3);
}

#[actix_web::test]
async fn test_head_redirect() {
    let (_memory, storage, clicks, config) = setup();
    storage
        .insert(UrlRecord::new("https://example.com", "abc123"))
        .await;
    let app = init_app!(storage, clicks, config);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
}
