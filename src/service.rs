// src/service.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::address::parse_address_query;
use crate::config::ServiceMode;
use crate::domain::document::CATALOG;
use crate::domain::{AddressResult, CartItem, Order, OrderItem, PropertyDocument};
use crate::mock::{generate_document_content, mock_order_id, search_mock_addresses, westmead_result};
use crate::provider::{
    interpret_status, map_search_response, OrderRequest, ProviderError, ProviderReply,
    ProviderResponse, StatusOutcome, TitleProvider,
};

const DEFAULT_DOWNLOAD_TYPE: &str = "application/octet-stream";

/// Result of handing a checkout to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub id: String,
    /// Set only when the provider accepted the order.
    pub provider_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub content_type: String,
    pub disposition: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    /// Provider download, with a generic binary type and a PDF file name
    /// when the provider leaves the headers out.
    pub fn from_reply(reply: ProviderReply, order_id: &str) -> Self {
        Self {
            content_type: reply
                .content_type
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_TYPE.to_string()),
            disposition: reply
                .content_disposition
                .unwrap_or_else(|| format!("attachment; filename=\"document-{order_id}.pdf\"")),
            bytes: reply.body,
        }
    }
}

/// Searches, orders and downloads, either against the title provider or the
/// built-in mock data.
pub struct PropertyService {
    mode: ServiceMode,
    provider: Arc<dyn TitleProvider>,
}

impl PropertyService {
    pub fn new(mode: ServiceMode, provider: Arc<dyn TitleProvider>) -> Self {
        Self { mode, provider }
    }

    pub fn mode(&self) -> ServiceMode {
        self.mode
    }

    pub fn provider(&self) -> &dyn TitleProvider {
        self.provider.as_ref()
    }

    pub fn search_address(&self, query: &str) -> Result<Vec<AddressResult>, ProviderError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        match self.mode {
            ServiceMode::Mock => Ok(search_mock_addresses(query)),
            ServiceMode::Live => {
                let parsed = parse_address_query(query);
                log::info!("searching provider for {:?}", parsed.to_query_string());

                let reply = self.provider.search_titles(&parsed)?.error_for_status()?;
                let resp = ProviderResponse::from_value(reply.parse_json()?);
                Ok(map_search_response(&resp, query))
            }
        }
    }

    /// Every catalog document can be ordered for any property.
    pub fn available_documents(&self, _property_id: &str) -> Vec<PropertyDocument> {
        CATALOG
            .iter()
            .cloned()
            .map(|doc| PropertyDocument {
                available: true,
                ..doc
            })
            .collect()
    }

    /// Places the order with the provider, falling back to a local reference
    /// whenever the provider is not used or does not hand back an order id.
    pub fn order_documents(&self, items: &[CartItem], now: DateTime<Utc>) -> PlacedOrder {
        let fallback = || PlacedOrder {
            id: mock_order_id(),
            provider_reference: None,
        };

        let first = match (self.mode, items.first()) {
            (ServiceMode::Live, Some(first)) => first,
            _ => return fallback(),
        };

        let request = OrderRequest {
            title_reference: first.title_reference.clone(),
            street: first.street.clone(),
            suburb: first.suburb.clone(),
            state: first.state.clone(),
            postcode: first.postcode.clone(),
            client_reference: format!("TitleFlow-Order-{}", now.timestamp_millis()),
        };

        match self.place_provider_order(&request) {
            Ok(Some(order_id)) => PlacedOrder {
                id: order_id.clone(),
                provider_reference: Some(order_id),
            },
            Ok(None) => {
                log::warn!("provider accepted order without an order id, using a local reference");
                fallback()
            }
            Err(e) => {
                log::error!("provider order failed, using a local reference: {e}");
                fallback()
            }
        }
    }

    fn place_provider_order(&self, request: &OrderRequest) -> Result<Option<String>, ProviderError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ProviderError::UnexpectedShape(e.to_string()))?;
        let reply = self.provider.place_order(&body)?.error_for_status()?;
        let resp = ProviderResponse::from_value(reply.parse_json()?);
        Ok(resp.any_order_id().map(str::to_string))
    }

    pub fn download_document(
        &self,
        order: &Order,
        item: &OrderItem,
        now: DateTime<Utc>,
    ) -> Result<DocumentFile, ProviderError> {
        if let (ServiceMode::Live, Some(reference)) = (self.mode, &order.provider_reference) {
            let reply = self.provider.download(reference)?.error_for_status()?;
            return Ok(DocumentFile::from_reply(reply, reference));
        }

        let text = generate_document_content(
            item.document.doc_type,
            &item.address,
            item.title_reference.as_deref(),
            &order.id,
            now,
        );
        Ok(DocumentFile {
            content_type: mime::TEXT_PLAIN_UTF_8.to_string(),
            disposition: format!(
                "attachment; filename=\"{}-{}.txt\"",
                order.id, item.document.id
            ),
            bytes: text.into_bytes(),
        })
    }

    /// Provider errors are logged and reported as still pending.
    pub fn poll_order_status(&self, order_id: &str) -> StatusOutcome {
        if self.mode == ServiceMode::Mock {
            return StatusOutcome::Complete(vec![westmead_result()]);
        }

        let polled = self
            .provider
            .order_status(order_id)
            .and_then(|reply| reply.error_for_status())
            .and_then(|reply| reply.parse_json());

        match polled {
            Ok(value) => interpret_status(&ProviderResponse::from_value(value)),
            Err(e) => {
                log::warn!("status poll for {order_id} failed: {e}");
                StatusOutcome::Pending
            }
        }
    }
}
