mod common;

use axum::{routing::post, Router};
use axum_test::TestServer;
use storefront::web::handlers::revalidate_handler;

fn server(state: storefront::AppState) -> TestServer {
    let app = Router::new()
        .route("/revalidate", post(revalidate_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_revalidate_rejects_wrong_secret() {
    let server = server(common::create_test_state());

    let response = server
        .post("/revalidate")
        .add_query_param("secret", "wrong")
        .add_query_param("path", "/blog/some-post")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_revalidate_missing_secret_is_unauthorized() {
    let server = server(common::create_test_state());

    let response = server.post("/revalidate").await;
    response.assert_status_unauthorized();

    let response = server
        .post("/revalidate")
        .add_query_param("path", "/blog/some-post")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_revalidate_without_path_uses_blog_index() {
    let state = common::create_test_state();
    state
        .cache
        .set("/blog", "<html>stale list</html>", None)
        .await
        .unwrap();

    let server = server(state.clone());

    let response = server
        .post("/revalidate")
        .add_query_param("secret", "test-secret")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["revalidated"], true);
    assert_eq!(json["path"], "/blog");

    assert_eq!(state.cache.get("/blog").await.unwrap(), None);
}

#[tokio::test]
async fn test_revalidate_rejects_relative_path() {
    let server = server(common::create_test_state());

    let response = server
        .post("/revalidate")
        .add_query_param("secret", "test-secret")
        .add_query_param("path", "blog/some-post")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_revalidate_drops_cached_page() {
    let state = common::create_test_state();
    state
        .cache
        .set("/blog/some-post", "<html>stale</html>", None)
        .await
        .unwrap();

    let server = server(state.clone());

    let response = server
        .post("/revalidate")
        .add_query_param("secret", "test-secret")
        .add_query_param("path", "/blog/some-post")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["revalidated"], true);
    assert_eq!(json["path"], "/blog/some-post");

    assert_eq!(state.cache.get("/blog/some-post").await.unwrap(), None);
}
