// src/address/normalize.rs
use regex::Regex;
use std::sync::OnceLock;

const ABBREVIATIONS: [(&str, &str); 5] = [
    ("street", "st"),
    ("drive", "dr"),
    ("road", "rd"),
    ("avenue", "ave"),
    ("place", "pl"),
];

fn abbreviation_regexes() -> &'static [(Regex, &'static str)] {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| {
        ABBREVIATIONS
            .iter()
            .map(|(word, short)| {
                let re = Regex::new(&format!(r"\s+{word}\b")).expect("suffix pattern is valid");
                (re, *short)
            })
            .collect()
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Lower-cases, drops commas and abbreviates common street suffixes so that
/// "42 Wallaby Way, Sydney" and "42 wallaby way sydney" compare equal.
pub fn normalize_address(addr: &str) -> String {
    let mut text = addr.to_lowercase().replace(',', "");

    for (re, short) in abbreviation_regexes() {
        text = re.replace_all(&text, format!(" {short}")).into_owned();
    }

    whitespace_regex()
        .replace_all(&text, " ")
        .trim()
        .to_string()
}
