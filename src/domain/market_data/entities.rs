pub use super::value_objects::{Price, Timestamp, Volume};
use crate::domain::errors::QuoteError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One trading day exactly as the provider sent it. Every field is a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawDailyRecord {
    #[serde(rename = "1. open", default)]
    pub open: String,
    #[serde(rename = "2. high", default)]
    pub high: String,
    #[serde(rename = "3. low", default)]
    pub low: String,
    #[serde(rename = "4. close", default)]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: String,
}

impl RawDailyRecord {
    pub fn new(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Self {
        Self {
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: volume.to_string(),
        }
    }
}

/// Body of a `TIME_SERIES_DAILY` response.
///
/// The per-date map is keyed by ISO date and carries no ordering guarantee.
/// On HTTP 200 the provider may still answer with one of the advisory fields
/// instead of (or next to) the series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "Time Series (Daily)", default, skip_serializing_if = "Option::is_none")]
    pub time_series: Option<HashMap<String, RawDailyRecord>>,
    #[serde(rename = "Note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "Error Message", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(rename = "Information", default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

impl QuoteResponse {
    pub fn from_series(series: impl IntoIterator<Item = (String, RawDailyRecord)>) -> Self {
        Self { time_series: Some(series.into_iter().collect()), ..Default::default() }
    }

    /// Provider-level error carried in the body, checked in `Note`, `Error Message`,
    /// `Information` order. Takes precedence over any series in the same body.
    pub fn soft_error(&self) -> Option<QuoteError> {
        if let Some(note) = &self.note {
            return Some(QuoteError::RateLimited(note.clone()));
        }
        if let Some(message) = &self.error_message {
            return Some(QuoteError::InvalidSymbol(message.clone()));
        }
        self.information.as_ref().map(|info| QuoteError::Advisory(info.clone()))
    }

    pub fn has_series(&self) -> bool {
        self.time_series.is_some()
    }
}

/// Anything positioned on the time axis
pub trait TimeSeriesPoint {
    fn timestamp(&self) -> Timestamp;
}

/// Closing price of one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub close: Price,
}

impl PricePoint {
    pub fn new(timestamp: Timestamp, close: Price) -> Self {
        Self { timestamp, close }
    }
}

impl TimeSeriesPoint for PricePoint {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Domain entity - one daily candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl OhlcPoint {
    /// All four prices, or `None` if any of them is blank.
    pub fn finite_quad(&self) -> Option<[f64; 4]> {
        Some([self.open.finite()?, self.high.finite()?, self.low.finite()?, self.close.finite()?])
    }
}

impl TimeSeriesPoint for OhlcPoint {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub timestamp: Timestamp,
    pub volume: Volume,
}

impl TimeSeriesPoint for VolumePoint {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Raw provider strings by timestamp, so the UI can show exactly what was sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OhlcLookup {
    records: BTreeMap<Timestamp, RawDailyRecord>,
}

impl OhlcLookup {
    pub fn insert(&mut self, timestamp: Timestamp, record: RawDailyRecord) {
        self.records.insert(timestamp, record);
    }

    pub fn get(&self, timestamp: Timestamp) -> Option<&RawDailyRecord> {
        self.records.get(&timestamp)
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.records.contains_key(&timestamp)
    }

    /// Most recent record
    pub fn latest(&self) -> Option<(Timestamp, &RawDailyRecord)> {
        self.records.iter().next_back().map(|(ts, record)| (*ts, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Output of the normalizer: three parallel ascending sequences over the same
/// timestamps, plus the raw lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSeries {
    pub prices: Vec<PricePoint>,
    pub ohlc: Vec<OhlcPoint>,
    pub volume: Vec<VolumePoint>,
    pub lookup: OhlcLookup,
}

impl NormalizedSeries {
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.prices.iter().map(|p| p.timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_body_with_metadata() {
        let body = r#"{
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2024-01-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"}
            }
        }"#;
        let response: QuoteResponse = serde_json::from_str(body).expect("valid body");
        let series = response.time_series.as_ref().expect("series present");
        assert_eq!(series["2024-01-02"], RawDailyRecord::new("1", "2", "0.5", "1.5", "100"));
        assert_eq!(response.soft_error(), None);
    }

    #[test]
    fn note_wins_over_error_message() {
        let response = QuoteResponse {
            note: Some("rate limited".into()),
            error_message: Some("bad symbol".into()),
            ..Default::default()
        };
        assert_eq!(response.soft_error(), Some(QuoteError::RateLimited("rate limited".into())));
    }

    #[test]
    fn missing_record_fields_default_to_empty_strings() {
        let record: RawDailyRecord = serde_json::from_str(r#"{"4. close": "3"}"#).expect("partial record");
        assert_eq!(record.close, "3");
        assert!(record.open.is_empty());
    }

    #[test]
    fn latest_lookup_entry_is_the_largest_timestamp() {
        let mut lookup = OhlcLookup::default();
        lookup.insert(Timestamp::from_millis(20), RawDailyRecord::new("2", "2", "2", "2", "2"));
        lookup.insert(Timestamp::from_millis(10), RawDailyRecord::new("1", "1", "1", "1", "1"));
        assert_eq!(lookup.latest().map(|(ts, _)| ts), Some(Timestamp::from_millis(20)));
    }
}
