// src/provider/client.rs
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;
use std::str::FromStr;
use url::Url;

use crate::address::ParsedAddress;
use crate::config::ProviderConfig;
use crate::provider::{ProviderError, TitleSearchRequest};

const USER_AGENT: &str = concat!("titleflow/", env!("CARGO_PKG_VERSION"));

const TITLE_SEARCH_PATH: &str = "/service/au-api/v3/api/national/titles/address";
const ORDERS_PATH: &str = "/services/customer-propertyenquiry/v1/orders";

/// How the API key is presented in the `Authorization` header.
/// Every provider call uses the same scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    Basic,
    ApiKey,
}

impl AuthScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthScheme::Bearer => "Bearer",
            AuthScheme::Basic => "Basic",
            AuthScheme::ApiKey => "ApiKey",
        }
    }

    pub fn header_value(self, api_key: &str) -> String {
        format!("{} {}", self.as_str(), api_key)
    }
}

impl FromStr for AuthScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "basic" => Ok(AuthScheme::Basic),
            "apikey" => Ok(AuthScheme::ApiKey),
            _ => Err(()),
        }
    }
}

/// Raw provider response, relayed as-is by the proxy endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub reason: String,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ProviderReply {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            reason: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            content_type: Some("application/json".to_string()),
            content_disposition: None,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn parse_json(&self) -> Result<Value, ProviderError> {
        serde_json::from_slice(&self.body).map_err(|e| ProviderError::JsonParse(e.to_string()))
    }

    /// Turns a non-2xx reply into [`ProviderError::Status`].
    pub fn error_for_status(self) -> Result<Self, ProviderError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ProviderError::Status {
            status: self.status,
            reason: self.reason.clone(),
            details: self.text(),
        })
    }
}

/// The title-search vendor as seen by the storefront.
pub trait TitleProvider: Send + Sync {
    fn search_titles(&self, address: &ParsedAddress) -> Result<ProviderReply, ProviderError>;
    fn place_order(&self, body: &Value) -> Result<ProviderReply, ProviderError>;
    fn order_status(&self, order_id: &str) -> Result<ProviderReply, ProviderError>;
    fn download(&self, order_id: &str) -> Result<ProviderReply, ProviderError>;
}

pub struct InfoTrackClient {
    client: Client,
    base: Url,
    api_key: String,
    scheme: AuthScheme,
}

impl InfoTrackClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let base = Url::parse(&cfg.host)
            .map_err(|e| ProviderError::Config(format!("invalid host {}: {e}", cfg.host)))?;

        Ok(Self {
            client,
            base,
            api_key: cfg.api_key.clone(),
            scheme: cfg.auth_scheme,
        })
    }

    fn endpoint(&self, path: &str, tail: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        if !tail.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ProviderError::Config("provider host cannot be a base URL".into()))?
                .extend(tail);
        }
        Ok(url)
    }

    fn key_preview(&self) -> String {
        self.api_key.chars().take(10).collect()
    }

    fn send(&self, req: RequestBuilder) -> Result<ProviderReply, ProviderError> {
        let resp = req
            .header(AUTHORIZATION, self.scheme.header_value(&self.api_key))
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        let header = |name: HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);

        let body = resp
            .bytes()
            .map_err(|e| ProviderError::Network(e.to_string()))?
            .to_vec();

        if !status.is_success() {
            log::error!(
                "provider error {status}: {}",
                String::from_utf8_lossy(&body).chars().take(300).collect::<String>()
            );
        }

        Ok(ProviderReply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            content_disposition,
            body,
        })
    }
}

impl TitleProvider for InfoTrackClient {
    fn search_titles(&self, address: &ParsedAddress) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(TITLE_SEARCH_PATH, &[])?;
        let body = TitleSearchRequest::from(address);

        log::info!("title search {url} state={}", address.state);
        log::debug!(
            "title search body {:?}, auth {} {}...",
            body,
            self.scheme.as_str(),
            self.key_preview()
        );

        self.send(
            self.client
                .post(url)
                .query(&[("state", address.state.as_str())])
                .json(&body),
        )
    }

    fn place_order(&self, body: &Value) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(ORDERS_PATH, &[])?;
        log::info!("placing provider order {url}");
        self.send(self.client.post(url).json(body))
    }

    fn order_status(&self, order_id: &str) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(TITLE_SEARCH_PATH, &[order_id])?;
        log::info!("polling provider order {order_id}");
        self.send(
            self.client
                .get(url)
                .header(CONTENT_TYPE, "application/json"),
        )
    }

    fn download(&self, order_id: &str) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(ORDERS_PATH, &[order_id, "download"])?;
        log::info!("downloading provider order {order_id}");
        self.send(self.client.get(url))
    }
}
