use crate::domain::market_data::{OhlcLookup, RawDailyRecord, Timestamp};
use crate::time_utils::format_date_label;

/// Header panel showing one day's raw OHLCV strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcDisplay {
    pub timestamp: Timestamp,
    pub date: String,
    pub record: RawDailyRecord,
}

impl OhlcDisplay {
    /// The hovered day if it is known, otherwise the newest day of the payload.
    pub fn resolve(hover: Option<Timestamp>, lookup: &OhlcLookup) -> Option<Self> {
        let (timestamp, record) = hover
            .and_then(|ts| lookup.get(ts).map(|record| (ts, record)))
            .or_else(|| lookup.latest())?;
        Some(Self { timestamp, date: format_date_label(timestamp.value()), record: record.clone() })
    }

    /// `(label, value)` pairs in display order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("O", self.record.open.as_str()),
            ("H", self.record.high.as_str()),
            ("L", self.record.low.as_str()),
            ("C", self.record.close.as_str()),
            ("Vol", self.record.volume.as_str()),
        ]
    }
}
