// src/domain/document.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentType {
    TitleSearch,
    PlanImage,
    Dealing,
    Covenant,
    StrataReport,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::TitleSearch => "Title Search",
            DocumentType::PlanImage => "Deposited Plan / Strata Plan",
            DocumentType::Dealing => "Dealing / Instrument",
            DocumentType::Covenant => "Covenant",
            DocumentType::StrataReport => "Strata Inspection Report",
        }
    }
}

/// A purchasable document. Prices are whole cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDocument {
    pub id: &'static str,
    pub doc_type: DocumentType,
    pub description: &'static str,
    pub price_cents: i64,
    pub available: bool,
}

pub const CATALOG: [PropertyDocument; 4] = [
    PropertyDocument {
        id: "doc_title",
        doc_type: DocumentType::TitleSearch,
        description: "Current ownership details and encumbrances.",
        price_cents: 1850,
        available: true,
    },
    PropertyDocument {
        id: "doc_plan",
        doc_type: DocumentType::PlanImage,
        description: "Visual diagram of the lot dimensions and location.",
        price_cents: 1295,
        available: true,
    },
    PropertyDocument {
        id: "doc_covenant",
        doc_type: DocumentType::Covenant,
        description: "Details of restrictions on the use of the land.",
        price_cents: 2500,
        available: true,
    },
    PropertyDocument {
        id: "doc_dealing",
        doc_type: DocumentType::Dealing,
        description: "Copy of specific dealing or instrument.",
        price_cents: 1540,
        available: true,
    },
];

pub fn find_document(id: &str) -> Option<PropertyDocument> {
    CATALOG.iter().find(|d| d.id == id).cloned()
}

/// `1850` -> `"$18.50"`
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
