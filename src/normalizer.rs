// Record normalizer: turns loosely-typed source rows into Ipo values.
use crate::model::{Ipo, RawRecord, RawValue, PLACEHOLDER};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

/// Date layouts the calendar feed has been seen using, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
];

lazy_static! {
    /// Rescue pattern for dates buried inside longer text.
    static ref EMBEDDED_DATE_REGEX: Regex =
        Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("Invalid regex pattern");
}

/// Normalizes every record, silently dropping the unrepresentable ones.
pub fn normalize_all(records: &[RawRecord]) -> Vec<Ipo> {
    records.iter().filter_map(normalize).collect()
}

/// Builds an [`Ipo`] from one merged record, or `None` when no deal size
/// can be derived. The reported amount wins when present and non-zero;
/// otherwise price times shares fills in, and failing both the record
/// is skipped with a warning.
pub fn normalize(record: &RawRecord) -> Option<Ipo> {
    let label = name_field(record, "companyname");

    let price = record.get("proposedshareprice").and_then(parse_amount);
    let shares = record.get("sharesoffered").and_then(parse_amount);

    let offer_amount = record
        .get("dollarvalueofsharesoffered")
        .and_then(parse_amount)
        .filter(|amount| *amount != 0.0)
        .or_else(|| match (price, shares) {
            (Some(p), Some(s)) if p != 0.0 && s != 0.0 => Some(p * s),
            _ => None,
        });

    let Some(offer_amount) = offer_amount else {
        warn!("skipping {}: no deal size or price/shares available", label);
        return None;
    };

    Some(Ipo {
        company: label.clone(),
        label,
        price,
        shares,
        offer_amount,
        exchange: name_field(record, "proposedexchange"),
        pricing_date: record.get("priceddate").and_then(parse_pricing_date),
    })
}

/// Parses a pricing date out of whichever raw shape the source used.
pub fn parse_pricing_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Date(date) => Some(*date),
        RawValue::Text(text) => parse_date_str(text),
        RawValue::Number(number) => parse_date_str(&number.to_string()),
    }
}

fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // Last resort: pick a YYYY-M-D shape out of surrounding text.
    let captures = EMBEDDED_DATE_REGEX.captures(trimmed)?;
    let year = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let day = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a dollar or share amount. Text values lose currency symbols,
/// commas and inner spaces before the numeric parse; anything still
/// unparseable becomes `None`.
pub fn parse_amount(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(number) => Some(*number),
        RawValue::Date(_) => None,
        RawValue::Text(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|&c| !matches!(c, ',' | '$' | ' '))
                .collect();
            cleaned.parse().ok()
        }
    }
}

fn name_field(record: &RawRecord, key: &str) -> String {
    match record.get(key) {
        Some(value) => {
            let text = value.to_string();
            if text.trim().is_empty() {
                PLACEHOLDER.to_string()
            } else {
                text
            }
        }
        None => PLACEHOLDER.to_string(),
    }
}
