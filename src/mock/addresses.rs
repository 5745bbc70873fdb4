// src/mock/addresses.rs
use rand::Rng;

use crate::address::normalize_address;
use crate::domain::address::random_property_id;
use crate::domain::AddressResult;

pub struct TestScenario {
    pub label: &'static str,
    pub query: &'static str,
    pub description: &'static str,
}

/// Shortcuts offered on the search page.
pub const TEST_SCENARIOS: [TestScenario; 5] = [
    TestScenario {
        label: "NSW Address",
        query: "1 Test Street, Sydney NSW 2000",
        description: "Standard NSW Search",
    },
    TestScenario {
        label: "VIC Title",
        query: "1/PS123456",
        description: "Search by Title Reference",
    },
    TestScenario {
        label: "QLD Address",
        query: "2 Test Street, Brisbane QLD 4000",
        description: "Standard QLD Search",
    },
    TestScenario {
        label: "Title Alert Test",
        query: "2/SP724538",
        description: "Specific Test for Title Alerts Workflow",
    },
    TestScenario {
        label: "Prestons Test",
        query: "90 Dalmeny Drive, Prestons NSW 2170",
        description: "User Specific Test Case",
    },
];

struct MockAddress {
    id: &'static str,
    full_address: &'static str,
    street: &'static str,
    suburb: &'static str,
    state: &'static str,
    postcode: &'static str,
    lot_plan: &'static str,
    title_reference: &'static str,
}

impl MockAddress {
    fn to_result(&self) -> AddressResult {
        AddressResult {
            id: self.id.to_string(),
            full_address: self.full_address.to_string(),
            street: self.street.to_string(),
            suburb: self.suburb.to_string(),
            state: self.state.to_string(),
            postcode: self.postcode.to_string(),
            lot_plan: Some(self.lot_plan.to_string()),
            title_reference: Some(self.title_reference.to_string()),
        }
    }
}

const MOCK_ADDRESSES: [MockAddress; 8] = [
    MockAddress {
        id: "prop_001",
        full_address: "42 Wallaby Way, Sydney NSW 2000",
        street: "42 Wallaby Way",
        suburb: "Sydney",
        state: "NSW",
        postcode: "2000",
        lot_plan: "12//DP876543",
        title_reference: "12/DP876543",
    },
    MockAddress {
        id: "prop_002",
        full_address: "10 Downing Street, Melbourne VIC 3000",
        street: "10 Downing Street",
        suburb: "Melbourne",
        state: "VIC",
        postcode: "3000",
        lot_plan: "1//PS123456",
        title_reference: "1/PS123456",
    },
    MockAddress {
        id: "test_nsw_01",
        full_address: "1 Test Street, Sydney NSW 2000",
        street: "1 Test Street",
        suburb: "Sydney",
        state: "NSW",
        postcode: "2000",
        lot_plan: "1//DP111111",
        title_reference: "1/DP111111",
    },
    MockAddress {
        id: "test_vic_01",
        full_address: "100 Test Road, Melbourne VIC 3000",
        street: "100 Test Road",
        suburb: "Melbourne",
        state: "VIC",
        postcode: "3000",
        lot_plan: "1//PS123456",
        title_reference: "1/PS123456",
    },
    MockAddress {
        id: "test_qld_01",
        full_address: "2 Test Street, Brisbane QLD 4000",
        street: "2 Test Street",
        suburb: "Brisbane",
        state: "QLD",
        postcode: "4000",
        lot_plan: "2//SP222222",
        title_reference: "2/SP222222",
    },
    MockAddress {
        id: "test_alert_01",
        full_address: "Lot 2 in Strata Plan 724538",
        street: "2/SP724538",
        suburb: "Bondi",
        state: "NSW",
        postcode: "2026",
        lot_plan: "2//SP724538",
        title_reference: "2/SP724538",
    },
    MockAddress {
        id: "prop_test_001",
        full_address: "Unit 6, 32 Clifford St, Torrensville 5031",
        street: "Unit 6, 32 Clifford St",
        suburb: "Torrensville",
        state: "SA",
        postcode: "5031",
        lot_plan: "6//SP12345",
        title_reference: "CT 6000/100",
    },
    MockAddress {
        id: "prop_prestons_01",
        full_address: "90 Dalmeny Drive, Prestons NSW 2170",
        street: "90 Dalmeny Drive",
        suburb: "Prestons",
        state: "NSW",
        postcode: "2170",
        lot_plan: "2331//DP1092549",
        title_reference: "2331/1092549",
    },
];

/// Fuzzy search of the mock address book. A query that matches nothing gets
/// one synthetic result so the rest of the flow can still be exercised.
pub fn search_mock_addresses(query: &str) -> Vec<AddressResult> {
    let needle = normalize_address(query);

    let known: Vec<AddressResult> = MOCK_ADDRESSES
        .iter()
        .filter(|m| {
            normalize_address(m.full_address).contains(&needle)
                || normalize_address(m.title_reference).contains(&needle)
                || normalize_address(m.lot_plan).contains(&needle)
        })
        .map(MockAddress::to_result)
        .collect();

    if !known.is_empty() {
        return known;
    }

    let mut parts = query.split(',');
    let street = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(query)
        .to_string();
    let suburb = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("UNKNOWN")
        .to_string();

    vec![AddressResult {
        id: format!("sim_{}", random_property_id(5)),
        full_address: query.to_uppercase(),
        street,
        suburb,
        state: "NSW".to_string(),
        postcode: "2000".to_string(),
        lot_plan: Some("1//DP999999".to_string()),
        title_reference: Some("1/DP999999".to_string()),
    }]
}

/// Result reported by a completed mock status poll.
pub fn westmead_result() -> AddressResult {
    AddressResult {
        id: "mock_complete".to_string(),
        full_address: "49-51 Good Street, Westmead 2145".to_string(),
        street: "49-51 Good Street".to_string(),
        suburb: "Westmead".to_string(),
        state: "NSW".to_string(),
        postcode: "2145".to_string(),
        lot_plan: Some("Lot 1 DP123456".to_string()),
        title_reference: Some("1/SP123456".to_string()),
    }
}

pub fn mock_order_id() -> String {
    format!("ORD-{}", rand::thread_rng().gen_range(0..1_000_000))
}
