// src/domain/order.rs
use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::{Cart, PropertyDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Processing,
    Ready,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Processing => "processing",
            ItemStatus::Ready => "ready",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(ItemStatus::Processing),
            "ready" => Some(ItemStatus::Ready),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Processing,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(OrderStatus::Processing),
            "completed" => Some(OrderStatus::Completed),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order {order_id} is already {status}")]
pub struct TransitionError {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub property_id: String,
    pub address: String,
    pub title_reference: Option<String>,
    pub document: PropertyDocument,
    pub price_cents: i64,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    pub status: OrderStatus,
    /// Order id on the provider side, when the provider accepted the order.
    pub provider_reference: Option<String>,
    pub failure_reason: Option<String>,
}

impl Order {
    /// New `processing` order holding every cart item, priced at checkout time.
    pub fn from_cart(id: impl Into<String>, created_at: DateTime<Utc>, cart: &Cart) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| OrderItem {
                property_id: item.property_id.clone(),
                address: item.address.clone(),
                title_reference: item.title_reference.clone(),
                document: item.document.clone(),
                price_cents: item.document.price_cents,
                status: ItemStatus::Processing,
            })
            .collect();

        Order {
            id: id.into(),
            created_at,
            items,
            total_cents: cart.total_cents(),
            status: OrderStatus::Processing,
            provider_reference: None,
            failure_reason: None,
        }
    }

    /// processing -> completed, with every item ready.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.ensure_processing()?;
        self.status = OrderStatus::Completed;
        for item in &mut self.items {
            item.status = ItemStatus::Ready;
        }
        Ok(())
    }

    /// processing -> failed. Items keep their status.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_processing()?;
        self.status = OrderStatus::Failed;
        self.failure_reason = Some(reason.into());
        Ok(())
    }

    fn ensure_processing(&self) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError {
                order_id: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }
}
