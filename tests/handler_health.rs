mod common;

use axum::{routing::get, Router};
use axum_test::TestServer;
use storefront::web::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_unreachable_upstreams_do_not_fail_probe() {
    // Test config points backends at a closed port; the probe reports
    // them as errored but stays healthy on the cache alone.
    let state = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["commerce"]["status"], "error");
    assert_eq!(json["checks"]["content"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_reports_version() {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
