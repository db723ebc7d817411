use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use nest_core::{create_app_with_config, AppConfig, AppState, MemoryTransport};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn setup_app(transport: &MemoryTransport) -> Router {
    let config = AppConfig::default();
    let state = AppState::new(Arc::new(transport.clone()), &config);
    create_app_with_config(state, &config)
}

fn send_message(body: Value, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/send-message")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

fn amy() -> Value {
    json!({
        "name": "Amy",
        "email": "amy@x.com",
        "phone": "",
        "type": "Tour",
        "message": "Hello there"
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_well_formed_submission_sends_admin_then_confirmation() {
    let transport = MemoryTransport::new();
    let response = setup_app(&transport)
        .oneshot(send_message(amy(), Some("https://nomadicnest.netlify.app")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://nomadicnest.netlify.app"
    );
    assert_eq!(read_json(response).await, json!({ "success": true }));

    let sent = transport.delivered();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "nomadicnestkodai@gmail.com");
    assert_eq!(sent[0].subject, "New Message from Amy — Tour");
    assert!(!sent[0].html_body.contains("Phone:"));
    assert_eq!(sent[1].to, "amy@x.com");
    assert_eq!(sent[1].subject, "Thanks for contacting Nomadic Nest!");
}

#[tokio::test]
async fn test_missing_required_fields_send_nothing() {
    for field in ["name", "email", "type", "message"] {
        let transport = MemoryTransport::new();
        let mut body = amy();
        body.as_object_mut().unwrap().remove(field);

        let response = setup_app(&transport)
            .oneshot(send_message(body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field {}", field);
        assert_eq!(
            read_json(response).await,
            json!({ "success": false, "error": "Missing required fields" })
        );
        assert!(transport.attempts().is_empty(), "field {}", field);
    }
}

#[tokio::test]
async fn test_empty_and_null_values_count_as_missing() {
    let transport = MemoryTransport::new();
    let mut body = amy();
    body["name"] = json!("");
    body["message"] = Value::Null;

    let response = setup_app(&transport)
        .oneshot(send_message(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(transport.attempts().is_empty());
}

#[tokio::test]
async fn test_body_without_json_content_type_is_missing_fields() {
    let transport = MemoryTransport::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/send-message")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Amy"))
        .unwrap();

    let response = setup_app(&transport).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "success": false, "error": "Missing required fields" })
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let transport = MemoryTransport::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/send-message")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Amy\""))
        .unwrap();

    let response = setup_app(&transport).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "success": false, "error": "Invalid request body" })
    );
    assert!(transport.attempts().is_empty());
}

#[tokio::test]
async fn test_admin_failure_never_attempts_confirmation() {
    let transport = MemoryTransport::failing_at(0);
    let response = setup_app(&transport)
        .oneshot(send_message(amy(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({ "success": false, "error": "Failed to send email" })
    );
    assert_eq!(transport.attempts().len(), 1);
    assert_eq!(transport.attempts()[0].to, "nomadicnestkodai@gmail.com");
}

#[tokio::test]
async fn test_confirmation_failure_is_reported_the_same_way() {
    let transport = MemoryTransport::failing_at(1);
    let response = setup_app(&transport)
        .oneshot(send_message(amy(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({ "success": false, "error": "Failed to send email" })
    );
    assert_eq!(transport.delivered().len(), 1);
}

#[tokio::test]
async fn test_phone_is_included_when_provided() {
    let transport = MemoryTransport::new();
    let mut body = amy();
    body["phone"] = json!("+1 234-5678");

    let response = setup_app(&transport)
        .oneshot(send_message(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(transport.delivered()[0]
        .html_body
        .contains("<p><strong>Phone:</strong> +1 234-5678</p>"));
}
