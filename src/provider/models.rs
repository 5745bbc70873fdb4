use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::address::ParsedAddress;
use crate::domain::address::{random_property_id, AddressResult};

// ProviderResponse
//  ├── properties[]      (search result list)
//  │    ├── propertyId
//  │    ├── address { fullAddress, street, suburb, state, postcode }
//  │    ├── titleReference | titleRef | attributes.titleReference
//  │    └── lotPlan | planLabel | attributes.lotPlan
//  ├── relatedTitles[]   { titleReference }
//  ├── titleOrders[]     { orderId, titleReference, status }
//  ├── status | orderStatus
//  └── orderId, description, titleReference, failureReason, displayStatus

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TitleSearchRequest<'a> {
    pub street_address: &'a str,
    pub suburb: &'a str,
    pub postcode: &'a str,
}

impl<'a> From<&'a ParsedAddress> for TitleSearchRequest<'a> {
    fn from(addr: &'a ParsedAddress) -> Self {
        Self {
            street_address: &addr.street,
            suburb: &addr.suburb,
            postcode: &addr.postcode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub title_reference: Option<String>,
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub client_reference: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<Vec<ProviderProperty>>,
    #[serde(default, deserialize_with = "lenient")]
    pub related_titles: Option<Vec<RelatedTitle>>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_orders: Option<Vec<TitleOrder>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<NestedOrder>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub failure_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_status: Option<String>,
}

impl ProviderResponse {
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("provider response did not match expected shape: {e}");
            ProviderResponse::default()
        })
    }

    /// Order id at the root or under `order`.
    pub fn any_order_id(&self) -> Option<&str> {
        self.order_id
            .as_deref()
            .or_else(|| self.order.as_ref().and_then(|o| o.order_id.as_deref()))
    }

    fn status_text(&self) -> Option<&str> {
        self.status.as_deref().or(self.order_status.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedOrder {
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProperty {
    #[serde(default, deserialize_with = "lenient_string")]
    pub property_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<ProviderAddress>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_ref: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub attributes: Option<Attributes>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lot_plan: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plan_label: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub suburb: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub postcode: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lot_plan: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTitle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_reference: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOrder {
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

/// Ids and references arrive as strings or numbers depending on the endpoint.
/// Anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A nested record or list of the wrong shape reads as absent instead of
/// failing the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// What a status poll tells us about a provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Pending,
    Complete(Vec<AddressResult>),
    Failed(String),
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

impl ProviderProperty {
    fn into_result(self, fallback_address: &str) -> AddressResult {
        let address = self.address.unwrap_or_default();
        let attributes = self.attributes.unwrap_or_default();

        let title_reference = non_empty(&self.title_reference)
            .or(non_empty(&self.title_ref))
            .or(non_empty(&attributes.title_reference))
            .or(non_empty(&self.display))
            .map(str::to_string);

        let lot_plan = non_empty(&self.lot_plan)
            .or(non_empty(&self.plan_label))
            .or(non_empty(&attributes.lot_plan))
            .map(str::to_string);

        let full_address = non_empty(&address.full_address)
            .or(non_empty(&self.description))
            .unwrap_or(fallback_address)
            .to_string();

        AddressResult {
            id: non_empty(&self.property_id)
                .map(str::to_string)
                .unwrap_or_else(|| random_property_id(9)),
            full_address,
            street: address.street.unwrap_or_default(),
            suburb: address.suburb.unwrap_or_default(),
            state: address.state.unwrap_or_default(),
            postcode: address.postcode.unwrap_or_default(),
            lot_plan,
            title_reference,
        }
    }
}

/// Collects whichever result list the response carries as property records.
fn result_properties(resp: &ProviderResponse) -> Vec<ProviderProperty> {
    if let Some(props) = &resp.properties {
        return props.clone();
    }
    if let Some(titles) = &resp.related_titles {
        return titles
            .iter()
            .map(|t| ProviderProperty {
                title_reference: t.title_reference.clone(),
                display: Some(format!(
                    "Title {}",
                    t.title_reference.as_deref().unwrap_or_default()
                )),
                ..ProviderProperty::default()
            })
            .collect();
    }
    if let Some(orders) = &resp.title_orders {
        return orders
            .iter()
            .map(|o| ProviderProperty {
                title_reference: o.title_reference.clone(),
                display: Some(format!(
                    "Order {} - {}",
                    o.order_id.as_deref().unwrap_or_default(),
                    o.status.as_deref().unwrap_or_default()
                )),
                ..ProviderProperty::default()
            })
            .collect();
    }
    Vec::new()
}

/// Maps a title-search response to address results.
///
/// A search that was accepted but has not finished yet (`Pending`/`Waiting`)
/// yields one placeholder result carrying the provider order id.
pub fn map_search_response(resp: &ProviderResponse, query: &str) -> Vec<AddressResult> {
    let props = result_properties(resp);
    if !props.is_empty() {
        return props.into_iter().map(|p| p.into_result(query)).collect();
    }

    if let Some(status @ ("Pending" | "Waiting")) = resp.status.as_deref() {
        log::warn!("search accepted but still {status}; results need polling");
        let order_id = resp.order_id.clone();
        return vec![AddressResult {
            id: order_id.clone().unwrap_or_else(|| "pending".to_string()),
            full_address: query.to_string(),
            street: "Processing...".to_string(),
            suburb: String::new(),
            state: String::new(),
            postcode: String::new(),
            lot_plan: Some("Checking...".to_string()),
            title_reference: Some(format!(
                "PENDING (Order {})",
                order_id.as_deref().unwrap_or("unknown")
            )),
        }];
    }

    Vec::new()
}

/// Interprets a status-poll response (`status` or `orderStatus`).
pub fn interpret_status(resp: &ProviderResponse) -> StatusOutcome {
    match resp.status_text() {
        Some("Complete") => {
            let props = result_properties(resp);
            if !props.is_empty() {
                return StatusOutcome::Complete(
                    props
                        .into_iter()
                        .map(|p| p.into_result("Unknown Address"))
                        .collect(),
                );
            }
            StatusOutcome::Complete(vec![AddressResult {
                id: resp
                    .order_id
                    .clone()
                    .unwrap_or_else(|| random_property_id(9)),
                full_address: resp
                    .description
                    .clone()
                    .unwrap_or_else(|| "Verified Property".to_string()),
                street: String::new(),
                suburb: String::new(),
                state: String::new(),
                postcode: String::new(),
                lot_plan: None,
                title_reference: Some(
                    resp.title_reference
                        .clone()
                        .unwrap_or_else(|| "Verified".to_string()),
                ),
            }])
        }
        Some("Error") => StatusOutcome::Failed(
            resp.failure_reason
                .clone()
                .or_else(|| resp.display_status.clone())
                .unwrap_or_else(|| "Order Failed".to_string()),
        ),
        _ => StatusOutcome::Pending,
    }
}
