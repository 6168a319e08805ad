//! Turns the provider's unordered per-date map into ascending numeric series.

use super::entities::{
    NormalizedSeries, OhlcPoint, PricePoint, QuoteResponse, RawDailyRecord, VolumePoint,
};
use super::value_objects::{Price, Timestamp, Volume};
use crate::domain::logging::LogComponent;
use crate::time_utils::{local_midnight_millis, parse_calendar_date};

const COMPONENT: LogComponent = LogComponent::Domain("Normalizer");

/// Decimal string to float. Unparsable input becomes NaN and is kept.
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Normalize a response body. A body without a series yields empty output.
pub fn normalize(response: &QuoteResponse) -> NormalizedSeries {
    match &response.time_series {
        Some(series) => normalize_records(series.iter().map(|(date, record)| (date.as_str(), record))),
        None => NormalizedSeries::default(),
    }
}

/// Normalize `(ISO date, record)` pairs given in any order.
///
/// Dates are placed at local midnight. Records whose date cannot be parsed are
/// skipped. If two keys name the same day, e.g. `2024-01-02` and `2024-1-2`, the
/// record under the smallest key is kept whatever the input order.
pub fn normalize_records<'a>(
    records: impl IntoIterator<Item = (&'a str, &'a RawDailyRecord)>,
) -> NormalizedSeries {
    let mut dated: Vec<(Timestamp, &str, &RawDailyRecord)> = Vec::new();
    for (date, record) in records {
        match parse_calendar_date(date) {
            Some(day) => dated.push((Timestamp::from_millis(local_midnight_millis(day)), date, record)),
            None => {
                crate::log_warn!(COMPONENT, "skipping record with unparsable date {:?}", date);
            }
        }
    }

    dated.sort_by_key(|(ts, date, _)| (*ts, *date));
    dated.dedup_by_key(|(ts, _, _)| *ts);

    let mut out = NormalizedSeries {
        prices: Vec::with_capacity(dated.len()),
        ohlc: Vec::with_capacity(dated.len()),
        volume: Vec::with_capacity(dated.len()),
        ..Default::default()
    };

    for (timestamp, _, record) in dated {
        let close = Price::from(parse_decimal(&record.close));
        out.prices.push(PricePoint::new(timestamp, close));
        out.ohlc.push(OhlcPoint {
            timestamp,
            open: Price::from(parse_decimal(&record.open)),
            high: Price::from(parse_decimal(&record.high)),
            low: Price::from(parse_decimal(&record.low)),
            close,
        });
        out.volume.push(VolumePoint { timestamp, volume: Volume::from(parse_decimal(&record.volume)) });
        out.lookup.insert(timestamp, record.clone());
    }

    crate::log_debug!(COMPONENT, "normalized {} daily records", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::entities::RawDailyRecord;

    fn record(close: &str) -> RawDailyRecord {
        RawDailyRecord::new("1", "2", "0.5", close, "100")
    }

    #[test]
    fn malformed_numbers_become_nan_and_are_kept() {
        let bad = RawDailyRecord::new("abc", "2", "0.5", "", "n/a");
        let out = normalize_records([("2024-01-02", &bad)]);
        assert_eq!(out.len(), 1);
        assert!(out.prices[0].close.value().is_nan());
        assert!(out.ohlc[0].open.value().is_nan());
        assert_eq!(out.ohlc[0].high.value(), 2.0);
        assert!(out.volume[0].volume.value().is_nan());
    }

    #[test]
    fn unparsable_dates_are_skipped() {
        let good = record("1.5");
        let out = normalize_records([("2024-01-02", &good), ("not-a-date", &good)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn output_is_ascending_regardless_of_input_order() {
        let (a, b, c) = (record("3"), record("1"), record("2"));
        let out = normalize_records([("2024-01-05", &a), ("2024-01-02", &b), ("2024-01-03", &c)]);
        let closes: Vec<f64> = out.prices.iter().map(|p| p.close.value()).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(out.lookup.latest().map(|(_, r)| r.close.as_str()), Some("3"));
    }

    #[test]
    fn same_day_under_two_keys_keeps_the_smallest_key() {
        let (padded, short) = (record("1.0"), record("2.0"));
        for pairs in [[("2024-1-2", &short), ("2024-01-02", &padded)], [("2024-01-02", &padded), ("2024-1-2", &short)]] {
            let out = normalize_records(pairs);
            assert_eq!(out.len(), 1);
            assert_eq!(out.prices[0].close.value(), 1.0);
        }
    }

    #[test]
    fn absent_series_gives_empty_output() {
        let out = normalize(&QuoteResponse::default());
        assert!(out.is_empty());
        assert!(out.ohlc.is_empty());
        assert!(out.volume.is_empty());
        assert!(out.lookup.is_empty());
    }
}
