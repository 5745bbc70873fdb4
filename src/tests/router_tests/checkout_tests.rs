// src/tests/router_tests/checkout_tests.rs
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, ServiceMode};
use crate::db::carts::load_cart;
use crate::db::orders::list_orders;
use crate::domain::{ItemStatus, OrderStatus};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, location, post, test_app, test_app_with, visitor_cookie, wait_for_terminal,
    Canned, FakeProvider,
};
use astra::Response;
use serde_json::json;

/// Searches, fills the cart with two documents and returns the visitor cookie.
fn fill_cart(app: &crate::app::App, query: &str, property_id: &str) -> String {
    let cookie = visitor_cookie(&handle(get(&format!("/search?q={query}"), None), app).unwrap());
    for doc in ["doc_title", "doc_plan"] {
        let form = format!("property_id={property_id}&document_id={doc}");
        handle(post("/cart/add", Some(&cookie), &form), app).unwrap();
    }
    cookie
}

fn order_id_from(resp: &Response) -> String {
    location(resp)
        .strip_prefix("/orders/confirmation?id=")
        .expect("redirect to confirmation")
        .to_string()
}

#[test]
fn checkout_with_empty_cart_is_rejected() {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let err = handle(post("/checkout", None, ""), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn checkout_places_order_and_fulfillment_readies_items() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = fill_cart(&app, "Wallaby", "prop_001");

    let resp = handle(post("/checkout", Some(&cookie), ""), &app)?;
    assert_eq!(resp.status(), 303);
    let order_id = order_id_from(&resp);
    assert!(order_id.starts_with("ORD-"));

    let order = wait_for_terminal(&app.db, &order_id);
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.items.iter().all(|i| i.status == ItemStatus::Ready));
    assert_eq!(order.total_cents, 1850 + 1295);

    let body = body_string(handle(
        get(&format!("/orders/confirmation?id={order_id}"), Some(&cookie)),
        &app,
    )?);
    assert!(body.contains(&order_id));
    assert!(body.contains("Completed"));
    assert!(body.contains(&format!("/orders/download?order={order_id}&amp;item=1")));

    let cart_empty = app.db.with_conn(|conn| {
        let key = crate::auth::token::visitor_key(cookie.trim_start_matches("visitor="));
        Ok(load_cart(conn, &key)?.is_empty())
    })?;
    assert!(cart_empty);
    Ok(())
}

#[test]
fn download_before_ready_is_a_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::default();
    config.fulfillment.delay = Duration::from_secs(60);
    let (_dir, app) = test_app_with(config, Arc::new(FakeProvider::new()));
    let cookie = fill_cart(&app, "Wallaby", "prop_001");

    let order_id = order_id_from(&handle(post("/checkout", Some(&cookie), ""), &app)?);

    let body = body_string(handle(
        get(&format!("/orders/confirmation?id={order_id}"), Some(&cookie)),
        &app,
    )?);
    assert!(body.contains("being prepared"));
    assert!(!body.contains("/orders/download"));

    let err = handle(
        get(&format!("/orders/download?order={order_id}&item=0"), Some(&cookie)),
        &app,
    )
    .unwrap_err();
    match err {
        ServerError::Conflict(msg) => assert_eq!(msg, "Document not ready"),
        other => panic!("expected conflict, got {other:?}"),
    }
    Ok(())
}

#[test]
fn ready_document_downloads_as_placeholder_text() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = fill_cart(&app, "Prestons", "prop_prestons_01");
    let order_id = order_id_from(&handle(post("/checkout", Some(&cookie), ""), &app)?);
    wait_for_terminal(&app.db, &order_id);

    let resp = handle(
        get(&format!("/orders/download?order={order_id}&item=1"), Some(&cookie)),
        &app,
    )?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        resp.headers().get("content-disposition").unwrap().to_str()?,
        format!("attachment; filename=\"{order_id}-doc_plan.txt\"")
    );
    let text = body_string(resp);
    assert!(text.contains("DEPOSITED PLAN: 1092549"));

    let err = handle(
        get(&format!("/orders/download?order={order_id}&item=9"), Some(&cookie)),
        &app,
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    Ok(())
}

#[test]
fn title_alert_scenario_downloads_caveat_search() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = fill_cart(&app, "2%2FSP724538", "test_alert_01");
    let order_id = order_id_from(&handle(post("/checkout", Some(&cookie), ""), &app)?);
    wait_for_terminal(&app.db, &order_id);

    let text = body_string(handle(
        get(&format!("/orders/download?order={order_id}&item=0"), Some(&cookie)),
        &app,
    )?);
    assert!(text.contains("Property Address: Lot 2 in Strata Plan 724538"));
    assert!(text.contains("ROBERT SMITH"));
    assert!(text.contains("3. AM12345  CAVEAT BY INTERESTED PARTY"));
    assert!(text.contains("UNREGISTERED DEALINGS: AH123456  CAVEAT"));
    Ok(())
}

#[test]
fn orders_are_private_to_the_visitor() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, app) = test_app(ServiceMode::Mock, Arc::new(FakeProvider::new()));
    let cookie = fill_cart(&app, "Wallaby", "prop_001");
    let order_id = order_id_from(&handle(post("/checkout", Some(&cookie), ""), &app)?);

    let body = body_string(handle(get("/orders", Some(&cookie)), &app)?);
    assert!(body.contains(&format!("Order {order_id}")));

    let stranger = handle(get("/orders", None), &app)?;
    assert!(body_string(stranger).contains("No orders yet."));

    let err = handle(get(&format!("/orders/confirmation?id={order_id}"), None), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    Ok(())
}

#[test]
fn live_checkout_sends_first_item_and_polls_provider() -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(
        FakeProvider::new()
            .with_search(Canned::json(
                200,
                json!({"properties": [{
                    "propertyId": "P-9",
                    "address": {
                        "fullAddress": "1 Test St, Sydney NSW 2000",
                        "street": "1 Test St",
                        "suburb": "Sydney",
                        "state": "NSW",
                        "postcode": "2000"
                    },
                    "titleReference": "1/DP111111"
                }]}),
            ))
            .with_order(Canned::json(200, json!({"orderId": "5551"})))
            .with_status(Canned::json(200, json!({"status": "Complete"}))),
    );
    let mut config = AppConfig::default();
    config.mode = ServiceMode::Live;
    config.fulfillment.mode = crate::config::FulfillmentMode::Polling;
    config.fulfillment.poll_interval = Duration::ZERO;
    let (_dir, app) = test_app_with(config, fake.clone());

    let cookie = fill_cart(&app, "1+Test+St%2C+Sydney+NSW+2000", "P-9");
    let resp = handle(post("/checkout", Some(&cookie), ""), &app)?;
    assert_eq!(order_id_from(&resp), "5551");

    let order = wait_for_terminal(&app.db, "5551");
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.provider_reference.as_deref(), Some("5551"));

    let sent = fake.last_order_body().unwrap();
    assert_eq!(sent["titleReference"], "1/DP111111");
    assert_eq!(sent["street"], "1 Test St");
    assert!(fake.calls().contains(&"status:5551".to_string()));

    let stored = app.db.with_conn(|conn| {
        let key = crate::auth::token::visitor_key(cookie.trim_start_matches("visitor="));
        list_orders(conn, &key)
    })?;
    assert_eq!(stored.len(), 1);
    Ok(())
}

#[test]
fn polling_completes_fallback_orders_without_asking_the_provider(
) -> Result<(), Box<dyn std::error::Error>> {
    let fake = Arc::new(
        FakeProvider::new()
            .with_search(Canned::json(
                200,
                json!({"properties": [{"propertyId": "P-9", "titleReference": "1/DP111111"}]}),
            ))
            .with_order(Canned::Down)
            .with_status(Canned::json(404, json!({}))),
    );
    let mut config = AppConfig::default();
    config.mode = ServiceMode::Live;
    config.fulfillment.mode = crate::config::FulfillmentMode::Polling;
    config.fulfillment.delay = Duration::ZERO;
    config.fulfillment.poll_interval = Duration::ZERO;
    let (_dir, app) = test_app_with(config, fake.clone());

    let cookie = fill_cart(&app, "1+Test+St", "P-9");
    let order_id = order_id_from(&handle(post("/checkout", Some(&cookie), ""), &app)?);
    assert!(order_id.starts_with("ORD-"));

    let order = wait_for_terminal(&app.db, &order_id);
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.provider_reference, None);
    assert!(!fake.calls().iter().any(|c| c.starts_with("status:")));
    Ok(())
}
