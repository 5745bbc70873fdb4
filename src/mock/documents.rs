// src/mock/documents.rs
use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use crate::address::normalize_address;
use crate::domain::DocumentType;

fn title_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+/+[A-Z]+\d+").expect("title reference pattern is valid"))
}

/// Register details printed on a placeholder document.
struct LandDetails {
    lot_plan: String,
    owner: &'static str,
    unregistered_dealings: &'static str,
    lga: &'static str,
    parish: &'static str,
    is_title_alert: bool,
    is_prestons: bool,
}

impl LandDetails {
    fn for_item(address: &str, title_reference: Option<&str>) -> Self {
        let reference = title_reference.unwrap_or_default();
        let mentions = |needle: &str| address.contains(needle) || reference.contains(needle);
        let is_title_alert = mentions("SP724538");
        let is_prestons = normalize_address(address).contains("prestons") || mentions("2331/1092549");

        let mut details = LandDetails {
            lot_plan: format!(
                "Lot 1 in Deposited Plan {}",
                rand::thread_rng().gen_range(0..900_000)
            ),
            owner: "JOHN DOE & JANE DOE",
            unregistered_dealings: "NIL",
            lga: "SYDNEY",
            parish: "ALEXANDRIA",
            is_title_alert,
            is_prestons,
        };

        if title_reference_regex().is_match(address) {
            details.lot_plan = address.to_string();
        } else if title_reference_regex().is_match(reference) {
            details.lot_plan = reference.to_string();
        }

        if is_prestons {
            details.lot_plan = "Lot 2331 in Deposited Plan 1092549".to_string();
            details.owner = "MICHAEL SMITH & SARAH SMITH";
            details.lga = "LIVERPOOL";
            details.parish = "MINTO";
        }

        if is_title_alert {
            details.owner = "ROBERT SMITH";
            details.unregistered_dealings = "AH123456  CAVEAT  (DATED 14/12/2025)";
        }

        details
    }
}

/// Plain-text stand-in for a register document, used when no provider is wired in.
pub fn generate_document_content(
    doc_type: DocumentType,
    address: &str,
    title_reference: Option<&str>,
    order_id: &str,
    now: DateTime<Utc>,
) -> String {
    let date = now.format("%d/%m/%Y");
    let time = now.format("%H:%M:%S");
    let land = LandDetails::for_item(address, title_reference);

    match doc_type {
        DocumentType::TitleSearch => {
            let caveat = if land.is_title_alert {
                "3. AM12345  CAVEAT BY INTERESTED PARTY"
            } else {
                ""
            };
            format!(
                "LAND REGISTRY SERVICES - TITLE SEARCH
--------------------------------------------------
Search Date: {date}
Time: {time}
Reference: {order_id}

LAND DESCRIPTION
----------------
{lot_plan}
Property Address: {address}
LGA: {lga}
Parish: {parish}  County: CUMBERLAND

FIRST SCHEDULE
--------------
{owner}
AS JOINT TENANTS

SECOND SCHEDULE (NOTIFICATIONS)
---------------
1. RESERVATIONS AND CONDITIONS IN THE CROWN GRANT(S)
2. MORTGAGE TO COMMONWEALTH BANK OF AUSTRALIA
{caveat}

UNREGISTERED DEALINGS: {dealings}

*** END OF SEARCH ***
(Printed via TitleFlow System)",
                lot_plan = land.lot_plan,
                lga = land.lga,
                parish = land.parish,
                owner = land.owner,
                dealings = land.unregistered_dealings,
            )
        }
        DocumentType::PlanImage => {
            let plan_number = land
                .lot_plan
                .split_once("Plan ")
                .map(|(_, n)| n)
                .unwrap_or("876543");
            let (lot, area) = if land.is_prestons {
                ("2331", "650.0")
            } else {
                ("1", "500.0")
            };
            format!(
                "[OFFICIAL PLAN IMAGE PLACEHOLDER]

DEPOSITED PLAN: {plan_number}
---------------------
Plan of Subdivision
Address: {address}
LGA: {lga}

[ ASCII DIAGRAM ]
__________________________
|                        |
|        LOT {lot}           |
|      {area} m2          |
|                        |
|________________________|
      ROAD WIDENING
      (15m WIDE)

Surveyor: B. BUILDER
Registered: 12/03/1995",
                lga = land.lga,
            )
        }
        other => format!(
            "OFFICIAL DOCUMENT: {label}
Property: {address}
Order ID: {order_id}
Date: {date}

This certifies the details requested for the above property have been searched against the official register.

Status: CLEAR
Encumbrances: NONE LISTED
Caveats: NIL

Certified correct for the purposes of the Real Property Act.
Registrar General.",
            label = other.label().to_uppercase(),
        ),
    }
}
