// src/tests/router_tests/api_tests.rs
use std::sync::Arc;

use crate::config::ServiceMode;
use crate::provider::ProviderReply;
use crate::router::respond;
use crate::tests::utils::{body_json, body_string, get, post, test_app, Canned, FakeProvider};
use serde_json::json;

fn app_with(fake: FakeProvider) -> (tempfile::TempDir, crate::app::App, Arc<FakeProvider>) {
    let fake = Arc::new(fake);
    let (dir, app) = test_app(ServiceMode::Live, fake.clone());
    (dir, app, fake)
}

#[test]
fn search_requires_query() {
    let (_dir, app, fake) = app_with(FakeProvider::new());

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=++"] {
        let resp = respond(get(uri, None), &app);
        assert_eq!(resp.status(), 400);
        assert_eq!(body_json(resp), json!({"error": "Query parameter required"}));
    }
    assert!(fake.calls().is_empty());
}

#[test]
fn search_relays_provider_json() {
    let payload = json!({"properties": [{"propertyId": "1"}]});
    let (_dir, app, fake) = app_with(FakeProvider::new().with_search(Canned::json(200, payload.clone())));

    let resp = respond(get("/api/search?q=2+Test+Street%2C+Brisbane+QLD+4000", None), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), payload);
    assert_eq!(fake.calls(), vec!["search:2 Test Street|Brisbane|QLD|4000"]);
}

#[test]
fn search_provider_error_keeps_status_and_details() {
    let (_dir, app, _) = app_with(
        FakeProvider::new().with_search(Canned::json(401, json!({"message": "bad key"}))),
    );

    let resp = respond(get("/api/search?q=x", None), &app);
    assert_eq!(resp.status(), 401);
    let body = body_json(resp);
    assert_eq!(body["error"], "Provider Error: Unauthorized");
    assert_eq!(body["details"], r#"{"message":"bad key"}"#);
}

#[test]
fn search_transport_error_is_500() {
    let (_dir, app, _) = app_with(FakeProvider::new().with_search(Canned::Down));

    let resp = respond(get("/api/search?q=x", None), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(
        body_json(resp),
        json!({"error": "Failed to connect to Property Provider"})
    );
}

fn text_reply(status: u16, body: &str) -> Canned {
    Canned::Reply(ProviderReply {
        status,
        reason: "Accepted".to_string(),
        content_type: Some("text/html".to_string()),
        content_disposition: None,
        body: body.as_bytes().to_vec(),
    })
}

#[test]
fn search_and_status_answer_200_for_any_provider_success() {
    let (_dir, app, _) = app_with(
        FakeProvider::new()
            .with_search(Canned::json(202, json!({"status": "Pending"})))
            .with_status(Canned::json(202, json!({"status": "Waiting"}))),
    );

    let resp = respond(get("/api/search?q=x", None), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({"status": "Pending"}));

    let resp = respond(get("/api/status?orderId=1", None), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({"status": "Waiting"}));
}

#[test]
fn unreadable_provider_success_is_500() {
    let (_dir, app, _) = app_with(
        FakeProvider::new()
            .with_search(text_reply(200, "<html>gateway</html>"))
            .with_order(text_reply(201, "created"))
            .with_status(text_reply(200, "")),
    );

    let resp = respond(get("/api/search?q=x", None), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(
        body_json(resp),
        json!({"error": "Failed to connect to Property Provider"})
    );

    let resp = respond(post("/api/order", None, "{}"), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({"error": "Failed to place order"}));

    let resp = respond(get("/api/status?orderId=1", None), &app);
    assert_eq!(resp.status(), 500);
    let body = body_json(resp);
    assert!(body["error"].as_str().unwrap().starts_with("JSON parse error"));
}

#[test]
fn order_requires_post_and_json() {
    let (_dir, app, fake) = app_with(FakeProvider::new());

    let resp = respond(get("/api/order", None), &app);
    assert_eq!(resp.status(), 405);
    assert_eq!(body_json(resp), json!({"error": "Method not allowed"}));

    let resp = respond(post("/api/order", None, "not json"), &app);
    assert_eq!(resp.status(), 400);
    assert!(fake.calls().is_empty());
}

#[test]
fn order_relays_provider_status_and_body() {
    let (_dir, app, fake) = app_with(
        FakeProvider::new().with_order(Canned::json(422, json!({"message": "missing title"}))),
    );

    let resp = respond(post("/api/order", None, r#"{"street":"1 Test St"}"#), &app);
    assert_eq!(resp.status(), 422);
    assert_eq!(body_json(resp), json!({"message": "missing title"}));
    assert_eq!(fake.last_order_body(), Some(json!({"street": "1 Test St"})));

    let (_dir, app, _) = app_with(FakeProvider::new().with_order(Canned::Down));
    let resp = respond(post("/api/order", None, "{}"), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({"error": "Failed to place order"}));
}

#[test]
fn status_proxy() {
    let (_dir, app, fake) = app_with(
        FakeProvider::new().with_status(Canned::json(200, json!({"status": "Complete"}))),
    );

    let resp = respond(get("/api/status", None), &app);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({"error": "Order ID required"}));

    let resp = respond(get("/api/status?orderId=42", None), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({"status": "Complete"}));
    assert_eq!(fake.calls(), vec!["status:42"]);

    let (_dir, app, _) = app_with(FakeProvider::new().with_status(Canned::json(404, json!({}))));
    let resp = respond(get("/api/status?orderId=42", None), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({"error": "Not Found"}));

    let (_dir, app, _) = app_with(FakeProvider::new().with_status(Canned::Down));
    let resp = respond(get("/api/status?orderId=42", None), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(
        body_json(resp),
        json!({"error": "Network error: connection refused"})
    );
}

#[test]
fn download_proxy_defaults_headers() {
    let reply = ProviderReply {
        status: 200,
        reason: "OK".to_string(),
        content_type: None,
        content_disposition: None,
        body: b"PDFDATA".to_vec(),
    };
    let (_dir, app, _) = app_with(FakeProvider::new().with_download(Canned::Reply(reply)));

    let resp = respond(get("/api/download?orderId=77", None), &app);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"document-77.pdf\""
    );
    assert_eq!(body_string(resp), "PDFDATA");
}

#[test]
fn download_proxy_errors() {
    let (_dir, app, _) = app_with(FakeProvider::new());
    let resp = respond(get("/api/download", None), &app);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({"error": "Order ID required"}));

    let (_dir, app, _) = app_with(FakeProvider::new().with_download(Canned::json(403, json!({}))));
    let resp = respond(get("/api/download?orderId=1", None), &app);
    assert_eq!(resp.status(), 403);
    assert_eq!(body_json(resp), json!({"error": "Download failed"}));

    let (_dir, app, _) = app_with(FakeProvider::new().with_download(Canned::Down));
    let resp = respond(get("/api/download?orderId=1", None), &app);
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({"error": "Failed to download document"}));
}
