// NASDAQ IPO calendar source (public JSON API, no key required).
use crate::fetcher::{IpoQuery, IpoSource};
use crate::model::{FetchError, RawRecord, RawValue};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const BASE_URL: &str = "https://api.nasdaq.com/api/ipo/calendar";
// The calendar endpoint rejects requests without a browser-looking agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) IpoMonitor/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct CalendarEnvelope {
    data: Option<CalendarData>,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    priced: Option<RowTable>,
    upcoming: Option<UpcomingBlock>,
}

#[derive(Debug, Deserialize)]
struct UpcomingBlock {
    #[serde(rename = "upcomingTable")]
    upcoming_table: Option<RowTable>,
}

#[derive(Debug, Deserialize)]
struct RowTable {
    rows: Option<Vec<Value>>,
}

pub struct NasdaqSource {
    client: Client,
}

impl NasdaqSource {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for NasdaqSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IpoSource for NasdaqSource {
    async fn fetch(&self, query: IpoQuery, month: NaiveDate) -> Result<Vec<RawRecord>, FetchError> {
        let month_param = month.format("%Y-%m").to_string();

        let response = self
            .client
            .get(BASE_URL)
            .query(&[("date", month_param.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let envelope: CalendarEnvelope = response.json().await?;
        let data = envelope
            .data
            .ok_or_else(|| FetchError::InvalidResponse("missing data section".to_string()))?;

        // Either table may be absent or carry null rows mid-month.
        let rows = match query {
            IpoQuery::Priced => data.priced.and_then(|table| table.rows),
            IpoQuery::Upcoming => data
                .upcoming
                .and_then(|block| block.upcoming_table)
                .and_then(|table| table.rows),
        };

        Ok(rows
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .map(row_to_record)
            .collect())
    }
}

/// Converts one JSON row into an untyped record. Null fields are dropped,
/// strings and numbers keep their shape, anything else is stringified.
fn row_to_record(row: &Map<String, Value>) -> RawRecord {
    let mut record = RawRecord::new();
    for (key, value) in row {
        let raw = match value {
            Value::Null => continue,
            Value::String(text) => RawValue::Text(text.clone()),
            Value::Number(number) => match number.as_f64() {
                Some(number) => RawValue::Number(number),
                None => continue,
            },
            other => RawValue::Text(other.to_string()),
        };
        record.insert(key.clone(), raw);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_convert_with_null_fields_dropped() {
        let row = json!({
            "companyName": "Acme Corp",
            "proposedSharePrice": 25.0,
            "dealStatus": null,
        });
        let record = row_to_record(row.as_object().unwrap());

        assert_eq!(
            record.get("companyName"),
            Some(&RawValue::Text("Acme Corp".to_string()))
        );
        assert_eq!(
            record.get("proposedSharePrice"),
            Some(&RawValue::Number(25.0))
        );
        assert_eq!(record.get("dealStatus"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn priced_rows_deserialize_from_the_envelope() {
        let body = r#"{
            "data": {
                "priced": {
                    "rows": [
                        { "companyName": "Acme Corp", "pricedDate": "01/29/2026" }
                    ]
                },
                "upcoming": { "upcomingTable": { "rows": null } }
            }
        }"#;
        let envelope: CalendarEnvelope = serde_json::from_str(body).unwrap();
        let data = envelope.data.unwrap();

        let priced = data.priced.unwrap().rows.unwrap();
        assert_eq!(priced.len(), 1);
        assert!(data.upcoming.unwrap().upcoming_table.unwrap().rows.is_none());
    }

    #[test]
    fn missing_sections_stay_none() {
        let envelope: CalendarEnvelope = serde_json::from_str(r#"{ "data": {} }"#).unwrap();
        let data = envelope.data.unwrap();
        assert!(data.priced.is_none());
        assert!(data.upcoming.is_none());

        let empty: CalendarEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_none());
    }
}
