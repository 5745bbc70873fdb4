use astra::{Request, Response};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

use crate::address::parse_address_query;
use crate::app::App;
use crate::auth::Visitor;
use crate::db::carts::{add_cart_item, clear_cart, load_cart, remove_cart_item};
use crate::db::orders::{insert_order, list_orders, load_visitor_order, order_exists};
use crate::db::searches::{find_search_result, save_search_results};
use crate::domain::address::random_property_id;
use crate::domain::document::find_document;
use crate::domain::{Cart, CartItem, ItemStatus, Order};
use crate::errors::ServerError;
use crate::fulfillment::spawn_fulfillment;
use crate::responses::{
    error_to_response, file_response, html_response, html_status, json_error, json_response,
    redirect, ResultResp,
};
use crate::service::DocumentFile;
use crate::templates::{links, pages};

const MAX_BODY_BYTES: u64 = 1 << 20;

type Params = HashMap<String, String>;

/// Entry point for the server: never fails, errors become error pages
/// (or JSON bodies under `/api/`). A new visitor gets a cookie either way.
pub fn respond(req: Request, app: &App) -> Response {
    let wants_json = req.uri().path().starts_with("/api/");
    let visitor = Visitor::from_request(&req);
    let mut resp =
        route(req, app, &visitor).unwrap_or_else(|err| error_to_response(err, wants_json));
    visitor.attach(&mut resp);
    resp
}

/// Like [`respond`] but hands the error back instead of rendering it.
#[cfg(test)]
pub fn handle(req: Request, app: &App) -> ResultResp {
    let visitor = Visitor::from_request(&req);
    let mut resp = route(req, app, &visitor)?;
    visitor.attach(&mut resp);
    Ok(resp)
}

fn route(req: Request, app: &App, visitor: &Visitor) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    log::debug!("{method} {path}");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let cart = visitor_cart(app, visitor)?;
            html_response(pages::home_page(cart.len()))
        }
        ("GET", "/search") => search(app, visitor, &query),
        ("GET", "/property") => property(app, visitor, &query),
        ("GET", "/cart") => {
            let cart = visitor_cart(app, visitor)?;
            html_response(pages::cart_page(&cart, None))
        }
        ("POST", "/cart/add") => cart_add(app, visitor, &parse_form(req)?),
        ("POST", "/cart/remove") => cart_remove(app, visitor, &parse_form(req)?),
        ("POST", "/checkout") => checkout(app, visitor),
        ("GET", "/orders") => orders(app, visitor),
        ("GET", "/orders/confirmation") => confirmation(app, visitor, &query),
        ("GET", "/orders/download") => download(app, visitor, &query),

        ("GET", "/api/search") => api_search(app, &query),
        ("POST", "/api/order") => api_order(app, req),
        ("GET", "/api/status") => api_status(app, &query),
        ("GET", "/api/download") => api_download(app, &query),

        (
            _,
            "/" | "/search" | "/property" | "/cart" | "/cart/add" | "/cart/remove" | "/checkout"
            | "/orders" | "/orders/confirmation" | "/orders/download" | "/api/search"
            | "/api/order" | "/api/status" | "/api/download",
        ) => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> Params {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Could not read request body: {e}")))?;
    Ok(buf)
}

fn parse_form(req: Request) -> Result<Params, ServerError> {
    let body = read_body(req)?;
    Ok(form_urlencoded::parse(&body).into_owned().collect())
}

fn required<'a>(params: &'a Params, key: &str) -> Result<&'a str, ServerError> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("Missing {key}")))
}

fn visitor_cart(app: &App, visitor: &Visitor) -> Result<Cart, ServerError> {
    app.db.with_conn(|conn| load_cart(conn, &visitor.key))
}

// ---------------------------------------------------------------------------
// Storefront
// ---------------------------------------------------------------------------

fn search(app: &App, visitor: &Visitor, query: &Params) -> ResultResp {
    let q = query.get("q").map(|s| s.trim()).unwrap_or_default();
    let cart = visitor_cart(app, visitor)?;

    if q.is_empty() {
        return html_response(pages::home_page(cart.len()));
    }

    match app.service.search_address(q) {
        Ok(results) => {
            app.db
                .with_conn(|conn| save_search_results(conn, &visitor.key, &results))?;
            log::info!("search {q:?} returned {} result(s)", results.len());

            html_response(pages::search_page(&pages::SearchVm {
                query: q,
                results: Some(&results),
                error: None,
                cart_count: cart.len(),
            }))
        }
        Err(e) => {
            log::error!("search {q:?} failed: {e}");
            html_status(
                502,
                pages::search_page(&pages::SearchVm {
                    query: q,
                    results: None,
                    error: Some("Search failed"),
                    cart_count: cart.len(),
                }),
            )
        }
    }
}

fn property(app: &App, visitor: &Visitor, query: &Params) -> ResultResp {
    let id = required(query, "id")?;

    let (found, cart) = app.db.with_conn(|conn| {
        let found = find_search_result(conn, &visitor.key, id)?;
        let cart = load_cart(conn, &visitor.key)?;
        Ok((found, cart))
    })?;
    let property = found.ok_or(ServerError::NotFound)?;

    let documents = app.service.available_documents(&property.id);
    html_response(pages::property_page(&property, &documents, &cart))
}

fn cart_add(app: &App, visitor: &Visitor, form: &Params) -> ResultResp {
    let property_id = required(form, "property_id")?;
    let document_id = required(form, "document_id")?;
    let document = find_document(document_id)
        .ok_or_else(|| ServerError::BadRequest(format!("Unknown document {document_id}")))?;

    let added = app.db.with_conn(|conn| {
        let property = find_search_result(conn, &visitor.key, property_id)?
            .ok_or(ServerError::NotFound)?;
        let item = CartItem::for_property(&property, document);
        add_cart_item(conn, &visitor.key, &item, Utc::now().timestamp())
    })?;

    if !added {
        log::debug!("{property_id}/{document_id} already in cart");
    }
    redirect(&links::property(property_id))
}

fn cart_remove(app: &App, visitor: &Visitor, form: &Params) -> ResultResp {
    let property_id = required(form, "property_id")?;
    let document_id = required(form, "document_id")?;

    app.db
        .with_conn(|conn| remove_cart_item(conn, &visitor.key, property_id, document_id))?;
    redirect("/cart")
}

fn checkout(app: &App, visitor: &Visitor) -> ResultResp {
    let cart = visitor_cart(app, visitor)?;
    if cart.is_empty() {
        return Err(ServerError::BadRequest("Your cart is empty".to_string()));
    }

    match place_order(app, visitor, &cart) {
        Ok(order) => redirect(&links::confirmation(&order.id)),
        Err(e) => {
            log::error!("checkout failed: {e}");
            html_status(e.status(), pages::cart_page(&cart, Some("Checkout failed")))
        }
    }
}

/// Stores the order as `processing`, empties the cart and hands the order
/// to a fulfillment worker.
fn place_order(app: &App, visitor: &Visitor, cart: &Cart) -> Result<Order, ServerError> {
    let now = Utc::now();
    let placed = app.service.order_documents(cart.items(), now);

    let mut order = Order::from_cart(placed.id, now, cart);
    order.provider_reference = placed.provider_reference;

    app.db.with_conn(|conn| {
        if order_exists(conn, &order.id)? {
            order.id = format!("{}-{}", order.id, random_property_id(4));
        }
        insert_order(conn, &visitor.key, &order)?;
        clear_cart(conn, &visitor.key)
    })?;

    log::info!(
        "order {} placed: {} item(s), {} cents",
        order.id,
        order.items.len(),
        order.total_cents
    );

    let worker = spawn_fulfillment(
        app.db.clone(),
        app.service.clone(),
        app.config.fulfillment.clone(),
        order.id.clone(),
    );
    if worker.is_err() {
        log::warn!("order {} will stay processing", order.id);
    }

    Ok(order)
}

fn orders(app: &App, visitor: &Visitor) -> ResultResp {
    let (orders, cart) = app.db.with_conn(|conn| {
        Ok((list_orders(conn, &visitor.key)?, load_cart(conn, &visitor.key)?))
    })?;
    html_response(pages::orders_page(&orders, cart.len()))
}

fn confirmation(app: &App, visitor: &Visitor, query: &Params) -> ResultResp {
    let id = required(query, "id")?;
    let (order, cart) = app.db.with_conn(|conn| {
        Ok((
            load_visitor_order(conn, &visitor.key, id)?,
            load_cart(conn, &visitor.key)?,
        ))
    })?;
    let order = order.ok_or(ServerError::NotFound)?;
    html_response(pages::confirmation_page(&order, cart.len()))
}

fn download(app: &App, visitor: &Visitor, query: &Params) -> ResultResp {
    let order_id = required(query, "order")?;
    let index: usize = required(query, "item")?
        .parse()
        .map_err(|_| ServerError::BadRequest("Invalid item".to_string()))?;

    let order = app
        .db
        .with_conn(|conn| load_visitor_order(conn, &visitor.key, order_id))?
        .ok_or(ServerError::NotFound)?;
    let item = order.items.get(index).ok_or(ServerError::NotFound)?;

    if item.status != ItemStatus::Ready {
        return Err(ServerError::Conflict("Document not ready".to_string()));
    }

    let file = app.service.download_document(&order, item, Utc::now())?;
    file_response(file)
}

// ---------------------------------------------------------------------------
// Provider proxy
// ---------------------------------------------------------------------------

fn api_search(app: &App, query: &Params) -> ResultResp {
    let Ok(q) = required(query, "q") else {
        return json_error(400, "Query parameter required");
    };

    let parsed = parse_address_query(q);
    match app.service.provider().search_titles(&parsed) {
        Ok(reply) if reply.is_success() => match reply.parse_json() {
            Ok(data) => json_response(200, &data),
            Err(e) => {
                log::error!("proxy search reply unreadable: {e}");
                json_error(500, "Failed to connect to Property Provider")
            }
        },
        Ok(reply) => json_response(
            reply.status,
            &json!({
                "error": format!("Provider Error: {}", reply.reason),
                "details": reply.text(),
            }),
        ),
        Err(e) => {
            log::error!("proxy search failed: {e}");
            json_error(500, "Failed to connect to Property Provider")
        }
    }
}

fn api_order(app: &App, req: Request) -> ResultResp {
    let body = read_body(req)?;
    let Ok(order) = serde_json::from_slice::<Value>(&body) else {
        return json_error(400, "Invalid JSON body");
    };

    let placed = app
        .service
        .provider()
        .place_order(&order)
        .and_then(|reply| reply.parse_json().map(|data| (reply.status, data)));
    match placed {
        Ok((status, data)) => json_response(status, &data),
        Err(e) => {
            log::error!("proxy order failed: {e}");
            json_error(500, "Failed to place order")
        }
    }
}

fn api_status(app: &App, query: &Params) -> ResultResp {
    let Ok(order_id) = required(query, "orderId") else {
        return json_error(400, "Order ID required");
    };

    match app.service.provider().order_status(order_id) {
        Ok(reply) if reply.is_success() => match reply.parse_json() {
            Ok(data) => json_response(200, &data),
            Err(e) => json_error(500, &e.to_string()),
        },
        Ok(reply) => json_error(reply.status, &reply.reason),
        Err(e) => {
            log::error!("proxy status for {order_id} failed: {e}");
            json_error(500, &e.to_string())
        }
    }
}

fn api_download(app: &App, query: &Params) -> ResultResp {
    let Ok(order_id) = required(query, "orderId") else {
        return json_error(400, "Order ID required");
    };

    match app.service.provider().download(order_id) {
        Ok(reply) if reply.is_success() => file_response(DocumentFile::from_reply(reply, order_id)),
        Ok(reply) => json_error(reply.status, "Download failed"),
        Err(e) => {
            log::error!("proxy download for {order_id} failed: {e}");
            json_error(500, "Failed to download document")
        }
    }
}
