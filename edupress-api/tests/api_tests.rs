//! Router tests for edupress-api
//!
//! Requests go through the full router with `oneshot`; generation is served
//! by a fixed reply instead of the network.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use edupress_api::seed::seeded_library;
use edupress_api::{app, AppState, ContentSource, ErrorResponse, FixedReply};
use edupress::library::Library;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "----edupress-test-boundary";

fn router_with(library: Library, source: impl ContentSource + 'static) -> Router {
    app(AppState::new(library, Arc::new(source)))
}

fn router() -> Router {
    router_with(seeded_library(1024).unwrap(), FixedReply::failing())
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_upload(file_name: &str, mime: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/library")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let response = router().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "edupress API");
}

#[tokio::test]
async fn test_render_document() {
    let response = router()
        .oneshot(post_json(
            "/api/documents/flashcards",
            json!({ "topic": "Rivers", "cards": [{ "front": "Longest river in Zimbabwe?", "back": "Zambezi" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Rivers_Flashcards.pdf\""
    );
    assert!(body_bytes(response).await.starts_with(b"%PDF-1.7"));
}

#[tokio::test]
async fn test_unknown_kind_is_bad_request() {
    let response = router()
        .oneshot(post_json("/api/documents/poster", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn flashcard_request() -> Value {
    json!({ "grade": "Grade 3", "subject": "Science", "topic": "Insects", "count": 2 })
}

#[tokio::test]
async fn test_generate_returns_pdf() {
    let reply = r#"{"cards": [{"front": "How many legs does an insect have?", "back": "Six"}]}"#;
    let router = router_with(Library::default(), FixedReply::new(reply));

    let response = router
        .oneshot(post_json("/api/generate/flashcards", flashcard_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Insects_Flashcards.pdf\""
    );
}

#[tokio::test]
async fn test_generate_json_format_applies_request_metadata() {
    let reply = r#"{"topic": "Spiders", "cards": [{"front": "Do ants live in colonies?", "back": "Yes"}]}"#;
    let router = router_with(Library::default(), FixedReply::new(reply));

    let response = router
        .oneshot(post_json("/api/generate/flashcards?format=json", flashcard_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["kind"], "flashcards");
    assert_eq!(json["topic"], "Insects");
    assert_eq!(json["cards"][0]["back"], "Yes");
}

#[tokio::test]
async fn test_generation_failure_is_bad_gateway() {
    for source in [FixedReply::failing(), FixedReply::new("I cannot do that")] {
        let response = router_with(Library::default(), source)
            .oneshot(post_json("/api/generate/flashcards", flashcard_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.error, "generation failed");
    }
}

#[tokio::test]
async fn test_generate_rejects_incomplete_request() {
    let response = router_with(Library::default(), FixedReply::new("{}"))
        .oneshot(post_json("/api/generate/exam", json!({ "grade": "Grade 7" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_library_listing_starts_with_defaults() {
    let response = router().oneshot(get("/api/library")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let documents = json["documents"].as_array().unwrap();
    assert!(!documents.is_empty());
    assert_eq!(documents[0]["id"], "default-0");
    assert_eq!(documents[0]["isDefault"], true);
    assert_eq!(documents[0]["size"], "20 KB");
    assert_eq!(json["usedBytes"], 0);
    assert_eq!(json["capacity"], 1024);
}

#[tokio::test]
async fn test_default_paper_downloads_as_pdf() {
    let response = router().oneshot(get("/api/library/default-0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(body_bytes(response).await.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_default_paper_cannot_be_deleted() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/library/default-0")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_upload_download_delete() {
    let router = router();

    let response = router
        .clone()
        .oneshot(multipart_upload("term2.pdf", "application/pdf", b"%PDF-1.4 fake"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let document = body_json(response).await;
    assert_eq!(document["name"], "term2.pdf");
    assert_eq!(document["category"], "Past Papers");
    assert_eq!(document["isDefault"], false);
    let id = document["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(get(&format!("/api/library/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.4 fake");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/library/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(get(&format!("/api/library/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejections() {
    let router = router();

    let response = router
        .clone()
        .oneshot(multipart_upload("photo.png", "image/png", b"png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error = body_json(response).await;
    assert_eq!(error["error"], "No valid files. PDF/Word/Excel max 5MB.");

    let response = router
        .oneshot(multipart_upload("big.docx", "application/msword", &[0u8; 2048]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INSUFFICIENT_STORAGE);
    let error = body_json(response).await;
    assert_eq!(error["error"], "Storage full! Please delete some old files.");
}
