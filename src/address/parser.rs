// src/address/parser.rs
use regex::Regex;
use std::sync::OnceLock;

/// Australian state and territory abbreviations the provider accepts.
pub const STATES: [&str; 8] = ["NSW", "VIC", "QLD", "WA", "SA", "TAS", "ACT", "NT"];

/// State sent to the provider when the query names none.
pub const DEFAULT_STATE: &str = "NSW";

/// A free-text query reshaped into the fields of a title search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
}

impl ParsedAddress {
    /// Formats back into `"Street, Suburb STATE POSTCODE"`.
    pub fn to_query_string(&self) -> String {
        format!(
            "{}, {} {} {}",
            self.street, self.suburb, self.state, self.postcode
        )
    }
}

fn location_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)\s+({})\s+(\d{{4}})$", STATES.join("|"));
        Regex::new(&pattern).expect("state/postcode pattern is valid")
    })
}

/// Best-effort split of a free-text address.
///
/// A trailing `STATE POSTCODE` is peeled off first. What remains is split into
/// street and suburb on the first comma, or else on the last space. Without a
/// trailing state the query is split on commas only and the state defaults to
/// [`DEFAULT_STATE`]. Never fails: unrecognised input ends up as the street.
pub fn parse_address_query(query: &str) -> ParsedAddress {
    let clean = query.trim();

    let mut parsed = ParsedAddress {
        street: clean.to_string(),
        suburb: String::new(),
        state: DEFAULT_STATE.to_string(),
        postcode: String::new(),
    };

    match location_regex().captures(clean) {
        Some(caps) => {
            // Group 0 always exists on a match.
            let whole = caps.get(0).map(|m| m.start()).unwrap_or(clean.len());
            parsed.state = caps[1].to_ascii_uppercase();
            parsed.postcode = caps[2].to_string();

            let remainder = clean[..whole].trim();
            if remainder.contains(',') {
                let (street, suburb) = split_on_comma(remainder);
                parsed.street = street;
                parsed.suburb = suburb;
            } else if let Some(idx) = remainder.rfind(' ') {
                parsed.street = remainder[..idx].trim_end().to_string();
                parsed.suburb = remainder[idx + 1..].to_string();
            } else {
                parsed.street = remainder.to_string();
            }
        }
        None => {
            if clean.contains(',') {
                let (street, suburb) = split_on_comma(clean);
                parsed.street = street;
                parsed.suburb = suburb;
            }
        }
    }

    parsed
}

fn split_on_comma(text: &str) -> (String, String) {
    let mut parts = text.split(',');
    let street = parts.next().unwrap_or_default().trim().to_string();
    let suburb = parts.next().unwrap_or_default().trim().to_string();
    (street, suburb)
}
