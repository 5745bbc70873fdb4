// src/tests/router_tests/storefront_tests.rs
use std::sync::Arc;

use crate::config::ServiceMode;
use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::tests::utils::{
    body_string, get, location, post, test_app, visitor_cookie, Canned, FakeProvider,
};
use serde_json::json;

#[test]
fn first_visit_sets_visitor_cookie_once() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    let resp = handle(get("/", None), &app)?;
    assert_eq!(resp.status(), 200);
    let cookie = visitor_cookie(&resp);
    assert!(cookie.starts_with("visitor="));

    let resp = handle(get("/", Some(&cookie)), &app)?;
    assert!(resp.headers().get("set-cookie").is_none());
    Ok(())
}

#[test]
fn error_responses_still_set_visitor_cookie() {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    let resp = respond(post("/checkout", None, ""), &app);
    assert_eq!(resp.status(), 400);
    assert!(visitor_cookie(&resp).starts_with("visitor="));

    let resp = respond(get("/nope", None), &app);
    assert_eq!(resp.status(), 404);
    let cookie = visitor_cookie(&resp);

    let resp = respond(get("/nope", Some(&cookie)), &app);
    assert!(resp.headers().get("set-cookie").is_none());
}

#[test]
fn home_page_lists_test_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    let body = body_string(handle(get("/", None), &app)?);
    assert!(body.contains("Title Alert Test"));
    assert!(body.contains("/search?q=2%2FSP724538"));
    Ok(())
}

#[test]
fn mock_search_renders_and_remembers_results() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    let resp = handle(get("/search?q=42+Wallaby+Way", None), &app)?;
    assert_eq!(resp.status(), 200);
    let cookie = visitor_cookie(&resp);
    let body = body_string(resp);
    assert!(body.contains("42 Wallaby Way, Sydney NSW 2000"));
    assert!(body.contains("/property?id=prop_001"));

    let body = body_string(handle(get("/property?id=prop_001", Some(&cookie)), &app)?);
    assert!(body.contains("12/DP876543"));
    assert_eq!(body.matches("Add to cart").count(), 4);
    Ok(())
}

#[test]
fn blank_search_renders_empty_search_page() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Live, Arc::new(FakeProvider::new()));

    let body = body_string(handle(get("/search?q=+++", None), &app)?);
    assert!(body.contains("Test scenarios"));
    assert!(!body.contains("result(s)"));
    Ok(())
}

#[test]
fn live_search_failure_shows_alert() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(FakeProvider::new().with_search(Canned::Down));
    let (_dir, app) = test_app(ServiceMode::Live, fake.clone());

    let resp = handle(get("/search?q=1+Test+St%2C+Sydney+NSW+2000", None), &app)?;
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Search failed"));
    assert_eq!(fake.calls(), vec!["search:1 Test St|Sydney|NSW|2000"]);
    Ok(())
}

#[test]
fn live_search_with_no_properties_shows_no_matches() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(FakeProvider::new().with_search(Canned::json(200, json!({"properties": []}))));
    let (_dir, app) = test_app(ServiceMode::Live, fake);

    let body = body_string(handle(get("/search?q=Nowhere", None), &app)?);
    assert!(body.contains("No properties matched"));
    Ok(())
}

#[test]
fn property_from_someone_elses_search_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    handle(get("/search?q=Wallaby", None), &app)?;
    let err = handle(get("/property?id=prop_001", None), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    Ok(())
}

#[test]
fn cart_add_is_idempotent_and_remove_works() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = visitor_cookie(&handle(get("/search?q=Wallaby", None), &app)?);
    let form = "property_id=prop_001&document_id=doc_title";

    let resp = handle(post("/cart/add", Some(&cookie), form), &app)?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/property?id=prop_001");
    handle(post("/cart/add", Some(&cookie), form), &app)?;
    handle(
        post("/cart/add", Some(&cookie), "property_id=prop_001&document_id=doc_covenant"),
        &app,
    )?;

    let body = body_string(handle(get("/cart", Some(&cookie)), &app)?);
    assert_eq!(body.matches("Title Search").count(), 1);
    assert!(body.contains("$43.50"));

    let resp = handle(post("/cart/remove", Some(&cookie), form), &app)?;
    assert_eq!(location(&resp), "/cart");
    let body = body_string(handle(get("/cart", Some(&cookie)), &app)?);
    assert!(!body.contains("Title Search"));
    assert!(body.contains("$25.00"));
    Ok(())
}

#[test]
fn cart_add_rejects_unknown_document() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = visitor_cookie(&handle(get("/search?q=Wallaby", None), &app)?);

    let err = handle(
        post("/cart/add", Some(&cookie), "property_id=prop_001&document_id=doc_strata"),
        &app,
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    Ok(())
}

#[test]
fn unknown_route_and_wrong_method() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));

    let resp = respond(get("/nope", None), &app);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));

    let err = handle(get("/checkout", None), &app).unwrap_err();
    assert!(matches!(err, ServerError::MethodNotAllowed));
    Ok(())
}
