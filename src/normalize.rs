use crate::model::ProductRecord;

/// Separator between brand and product name inside a lookup key. Two
/// characters, so a single `|` inside either field cannot split the key.
const KEY_SEPARATOR: &str = "||";

/// Identity key used to match a product across price list versions.
pub fn product_key(record: &ProductRecord) -> String {
    format!("{}{}{}", record.brand, KEY_SEPARATOR, record.product_name)
}

/// Outcome of coercing raw price text. `Absent` and `Unparseable` both
/// collapse to `0.0`, but stay distinguishable for callers that care.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedPrice {
    Absent,
    Unparseable,
    Amount(f64),
}

impl ParsedPrice {
    pub fn amount(self) -> f64 {
        match self {
            Self::Amount(value) => value,
            Self::Absent | Self::Unparseable => 0.0,
        }
    }
}

/// Best-effort price coercion: keep digits and decimal points in their
/// original order, parse the rest away. Never fails; malformed input is
/// silently worth `0.0`.
pub fn parse_price(raw: &str) -> ParsedPrice {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "nan" {
        return ParsedPrice::Absent;
    }

    let cleaned = trimmed
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == '.')
        .collect::<String>();
    if cleaned.is_empty() {
        return ParsedPrice::Unparseable;
    }

    match cleaned.parse::<f64>() {
        Ok(value) => ParsedPrice::Amount(value),
        Err(_) => ParsedPrice::Unparseable,
    }
}
