// src/domain/cart.rs
use crate::domain::{AddressResult, PropertyDocument};

/// A document chosen for a property, carrying a copy of the address so the
/// cart still renders after the search results are replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub property_id: String,
    pub address: String,
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub title_reference: Option<String>,
    pub document: PropertyDocument,
}

impl CartItem {
    pub fn for_property(property: &AddressResult, document: PropertyDocument) -> Self {
        Self {
            property_id: property.id.clone(),
            address: property.full_address.clone(),
            street: property.street.clone(),
            suburb: property.suburb.clone(),
            state: property.state.clone(),
            postcode: property.postcode.clone(),
            title_reference: property.title_reference.clone(),
            document,
        }
    }

    pub fn matches(&self, property_id: &str, document_id: &str) -> bool {
        self.property_id == property_id && self.document.id == document_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored rows, dropping repeated property/document pairs.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, property_id: &str, document_id: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.matches(property_id, document_id))
    }

    /// Returns false when the same document for the same property is already in the cart.
    pub fn add(&mut self, item: CartItem) -> bool {
        if self.contains(&item.property_id, item.document.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, property_id: &str, document_id: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| !item.matches(property_id, document_id));
        self.items.len() != before
    }

    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|item| item.document.price_cents).sum()
    }
}
