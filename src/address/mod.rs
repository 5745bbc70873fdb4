mod normalize;
mod parser;

pub use normalize::normalize_address;
pub use parser::{parse_address_query, ParsedAddress};
