//! End-to-end tests for the link processing endpoint

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use mockito::Server;
use pagekeep::{
    config::ServiceConfig,
    server::{AppState, create_router, error::ErrorResponse, handlers::MessageResponse},
    store::{Database, RecordSink},
};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Ignored</title>
    <style>body { font-family: serif; }</style>
    <script>console.log("tracking");</script>
</head>
<body>
    <nav>Home | About</nav>
    <article>
        <h1>A Quiet Morning</h1>
        <p>The kettle   hummed.</p>
        <script>evil()</script>
        <p>Nobody
        answered the door.</p>
    </article>
    <footer>Footer</footer>
</body>
</html>"#;

async fn create_test_app() -> (Router, Arc<Database>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let database = Arc::new(
        Database::new_from_path(&db_path.to_string_lossy())
            .await
            .unwrap(),
    );
    database.ensure_collection("articles").await.unwrap();

    let config = ServiceConfig::builder().database_path(db_path).build();
    let state = AppState::new(config, database.clone()).unwrap();
    (create_router(state), database, dir)
}

fn process_link_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/processLink")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _db, _dir) = create_test_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = body_json(response).await;
    assert_eq!(body, serde_json::json!({"message": "Ok"}));
}

#[tokio::test]
async fn test_process_link_stores_article() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/post")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(ARTICLE_PAGE)
        .expect(1)
        .create_async()
        .await;

    let (app, db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": format!("{}/post", server.url()) }).to_string();
    let response = app.oneshot(process_link_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: MessageResponse = body_json(response).await;
    assert_eq!(body.message, "Ok");
    let id = body.id.expect("response carries the record id");
    assert!(!id.is_empty());

    let record = db.get_record("articles", &id).await.unwrap().unwrap();
    assert_eq!(record.fields["title"], "A Quiet Morning");
    assert_eq!(
        record.fields["content"],
        "A Quiet Morning The kettle hummed. Nobody answered the door."
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_stored_record_is_viewable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/post")
        .with_status(200)
        .with_body(ARTICLE_PAGE)
        .create_async()
        .await;

    let (app, _db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": format!("{}/post", server.url()) }).to_string();
    let response = app
        .clone()
        .oneshot(process_link_request(payload))
        .await
        .unwrap();
    let body: MessageResponse = body_json(response).await;
    let id = body.id.unwrap();

    let request = Request::builder()
        .uri(format!("/api/collections/articles/records/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record: Value = body_json(response).await;
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["collectionName"], "articles");
    assert_eq!(record["title"], "A Quiet Morning");

    let request = Request::builder()
        .uri("/api/collections/articles/records/doesnotexist123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_in_unknown_collection_is_not_found() {
    let (app, _db, _dir) = create_test_app().await;

    let request = Request::builder()
        .uri("/api/collections/nope/records/abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.status, 404);
    assert!(error.error.contains("nope"));
    assert!(!error.message.contains("save"));
}

#[tokio::test]
async fn test_page_without_article_stores_empty_fields() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/plain")
        .with_status(200)
        .with_body("<html><body><h1>Title</h1><p>No article here</p></body></html>")
        .create_async()
        .await;

    let (app, db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": format!("{}/plain", server.url()) }).to_string();
    let response = app.oneshot(process_link_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: MessageResponse = body_json(response).await;
    let record = db
        .get_record("articles", &body.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.fields["title"], "");
    assert_eq!(record.fields["content"], "");
}

// A failing upstream used to terminate the whole process. It must come back
// as an error response while the service keeps answering.
#[tokio::test]
async fn test_non_200_upstream_is_an_error_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/gone")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let (app, db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": format!("{}/gone", server.url()) }).to_string();
    let response = app
        .clone()
        .oneshot(process_link_request(payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.status, 502);
    assert_eq!(body.message, "Failed to fetch link");
    assert!(body.error.contains("404"));
    assert_eq!(db.count_records("articles").await.unwrap(), 0);

    let health = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(health).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_upstream_is_an_error_response() {
    let (app, _db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": "http://127.0.0.1:9/" }).to_string();
    let response = app.oneshot(process_link_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.message, "Failed to fetch link");
    assert!(!body.error.is_empty());
}

#[tokio::test]
async fn test_malformed_requests() {
    let (app, _db, _dir) = create_test_app().await;

    let bodies = [
        "not json",
        "{}",
        r#"{"url": 42}"#,
        r#"{"link": "https://example.com"}"#,
    ];

    for body in bodies {
        let response = app
            .clone()
            .oneshot(process_link_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.message, "Failed to read request body");
    }
}

#[tokio::test]
async fn test_invalid_url_is_a_bad_request() {
    let (app, _db, _dir) = create_test_app().await;

    let payload = serde_json::json!({ "url": "definitely not a url" }).to_string();
    let response = app.oneshot(process_link_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "Invalid url");
}

#[tokio::test]
async fn test_missing_collection_is_a_persistence_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/post")
        .with_status(200)
        .with_body(ARTICLE_PAGE)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let database = Database::new_from_path(&db_path.to_string_lossy())
        .await
        .unwrap();
    let config = ServiceConfig::builder()
        .database_path(db_path)
        .collection("unprovisioned")
        .build();
    let app = create_router(AppState::new(config, Arc::new(database)).unwrap());

    let payload = serde_json::json!({ "url": format!("{}/post", server.url()) }).to_string();
    let response = app.oneshot(process_link_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "Failed to save to database");
    assert!(error.error.contains("unprovisioned"));
}
