// src/domain/address.rs
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

/// A property matched by a search. Immutable once produced; a newer search
/// replaces the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResult {
    pub id: String,
    pub full_address: String,
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub lot_plan: Option<String>,
    /// Title number (volume/folio) on the land register.
    pub title_reference: Option<String>,
}

/// Random lower-case id for results the provider did not identify.
pub fn random_property_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}
