use rusqlite::Connection;
use serde_json::Value;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

use crate::address::ParsedAddress;
use crate::app::App;
use crate::config::{AppConfig, ServiceMode};
use crate::db::connection::{init_db, Database};
use crate::db::orders::load_order;
use crate::domain::{AddressResult, Order, OrderStatus};
use crate::provider::{ProviderError, ProviderReply, TitleProvider};

/// In-memory connection with the production schema applied.
pub fn memory_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(include_str!("../../sql/schema.sql"))
        .expect("apply schema");
    conn
}

pub fn sample_property(id: &str) -> AddressResult {
    AddressResult {
        id: id.to_string(),
        full_address: "1 Test Street, Sydney NSW 2000".to_string(),
        street: "1 Test Street".to_string(),
        suburb: "Sydney".to_string(),
        state: "NSW".to_string(),
        postcode: "2000".to_string(),
        lot_plan: Some("1/DP111111".to_string()),
        title_reference: Some("1/DP111111".to_string()),
    }
}

/// Fresh file-backed database; keep the `TempDir` alive for the test's duration.
pub fn init_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("titleflow-test.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    (dir, db)
}

/// App on a fresh database with instant simulated fulfillment.
pub fn test_app(mode: ServiceMode, provider: Arc<FakeProvider>) -> (TempDir, App) {
    let mut config = AppConfig::default();
    config.mode = mode;
    config.fulfillment.delay = Duration::ZERO;
    config.fulfillment.poll_interval = Duration::ZERO;
    config.fulfillment.poll_attempts = 3;
    test_app_with(config, provider)
}

pub fn test_app_with(config: AppConfig, provider: Arc<FakeProvider>) -> (TempDir, App) {
    let (dir, db) = init_test_db();
    (dir, App::with_provider(config, db, provider))
}

/// Polls until the order leaves `processing` or the timeout passes.
pub fn wait_for_terminal(db: &Database, order_id: &str) -> Order {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let order = db
            .with_conn(|conn| load_order(conn, order_id))
            .expect("load order")
            .expect("order exists");
        if order.status != OrderStatus::Processing || Instant::now() > deadline {
            return order;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

pub fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .expect("read body");
    body
}

pub fn body_json(resp: astra::Response) -> Value {
    serde_json::from_str(&body_string(resp)).expect("json body")
}

/// What a [`FakeProvider`] call hands back.
#[derive(Debug, Clone)]
pub enum Canned {
    Reply(ProviderReply),
    /// Transport failure.
    Down,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Canned::Reply(ProviderReply::json(status, &body))
    }

    fn produce(&self) -> Result<ProviderReply, ProviderError> {
        match self {
            Canned::Reply(reply) => Ok(reply.clone()),
            Canned::Down => Err(ProviderError::Network("connection refused".to_string())),
        }
    }
}

/// Title provider double with canned replies and a call log.
pub struct FakeProvider {
    search: Canned,
    order: Canned,
    status: Canned,
    download: Canned,
    calls: Mutex<Vec<String>>,
    order_bodies: Mutex<Vec<Value>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let empty = Canned::json(200, serde_json::json!({}));
        Self {
            search: empty.clone(),
            order: empty.clone(),
            status: empty.clone(),
            download: empty,
            calls: Mutex::new(Vec::new()),
            order_bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search(mut self, c: Canned) -> Self {
        self.search = c;
        self
    }

    pub fn with_order(mut self, c: Canned) -> Self {
        self.order = c;
        self
    }

    pub fn with_status(mut self, c: Canned) -> Self {
        self.status = c;
        self
    }

    pub fn with_download(mut self, c: Canned) -> Self {
        self.download = c;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_order_body(&self) -> Option<Value> {
        self.order_bodies.lock().unwrap().last().cloned()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TitleProvider for FakeProvider {
    fn search_titles(&self, address: &ParsedAddress) -> Result<ProviderReply, ProviderError> {
        self.record(format!(
            "search:{}|{}|{}|{}",
            address.street, address.suburb, address.state, address.postcode
        ));
        self.search.produce()
    }

    fn place_order(&self, body: &Value) -> Result<ProviderReply, ProviderError> {
        self.record("order".to_string());
        self.order_bodies.lock().unwrap().push(body.clone());
        self.order.produce()
    }

    fn order_status(&self, order_id: &str) -> Result<ProviderReply, ProviderError> {
        self.record(format!("status:{order_id}"));
        self.status.produce()
    }

    fn download(&self, order_id: &str) -> Result<ProviderReply, ProviderError> {
        self.record(format!("download:{order_id}"));
        self.download.produce()
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> astra::Request {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(astra::Body::empty()).expect("build request")
}

pub fn post(uri: &str, cookie: Option<&str>, body: &str) -> astra::Request {
    let mut builder = http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder
        .body(astra::Body::from(body.to_string()))
        .expect("build request")
}

/// `visitor=<token>` pair from a response's `Set-Cookie`.
pub fn visitor_cookie(resp: &astra::Response) -> String {
    resp.headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("visitor cookie set")
        .to_string()
}

pub fn location(resp: &astra::Response) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
