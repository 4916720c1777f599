// Core structs: RawRecord, Ipo
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Placeholder for name-like fields the source did not provide.
pub const PLACEHOLDER: &str = "—";

/// One untyped field value as a listing source returned it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Number(number) => write!(f, "{}", number),
            RawValue::Date(date) => write!(f, "{}", date),
        }
    }
}

/// One row as returned by a listing source. Field names are whatever the
/// source used this time; presence and spelling vary by call, so nothing
/// here is typed until the normalizer takes over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names, sorted so log output stays stable.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn into_fields(self) -> HashMap<String, RawValue> {
        self.fields
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Normalized offering. The only shape the filter and the notifier see;
/// never mutated after the normalizer builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ipo {
    pub label: String,
    pub company: String,
    pub price: Option<f64>,
    pub shares: Option<f64>,
    pub offer_amount: f64,
    pub exchange: String,
    pub pricing_date: Option<NaiveDate>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected calendar response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("could not build alert message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
