mod addresses;
mod documents;

pub use addresses::{mock_order_id, search_mock_addresses, westmead_result, TEST_SCENARIOS};
pub use documents::generate_document_content;
