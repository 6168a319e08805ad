use chrono::{Days, NaiveDate};
use quickcheck_macros::quickcheck;
use stock_eod_dashboard::domain::chart::{DateRange, Period, PeriodSelection, filter_by_range, resolve_range};
use stock_eod_dashboard::domain::market_data::{Price, PricePoint, Timestamp};
use stock_eod_dashboard::time_utils::local_midnight_millis;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn ts(date: NaiveDate) -> Timestamp {
    Timestamp::from_millis(local_midnight_millis(date))
}

/// One timestamp per calendar day from `first` to `last` inclusive
fn daily(first: NaiveDate, last: NaiveDate) -> Vec<Timestamp> {
    first.iter_days().take_while(|d| *d <= last).map(ts).collect()
}

fn start_of(period: Period, last: NaiveDate) -> Timestamp {
    let stamps = daily(day(2020, 1, 1), last);
    resolve_range(&PeriodSelection::Named(period), &stamps).expect("range").start
}

#[test]
fn end_is_the_newest_data_point() {
    let stamps = daily(day(2024, 1, 1), day(2024, 6, 15));
    let range = resolve_range(&PeriodSelection::Named(Period::OneMonth), &stamps).expect("range");
    assert_eq!(range.end, ts(day(2024, 6, 15)));
    assert_eq!(range.start, ts(day(2024, 5, 15)));
}

#[test]
fn year_to_date_starts_on_january_first() {
    assert_eq!(start_of(Period::YearToDate, day(2024, 6, 15)), ts(day(2024, 1, 1)));
}

#[test]
fn month_arithmetic_clamps_to_month_end() {
    assert_eq!(start_of(Period::OneMonth, day(2024, 3, 31)), ts(day(2024, 2, 29)));
    assert_eq!(start_of(Period::OneMonth, day(2023, 3, 31)), ts(day(2023, 2, 28)));
    assert_eq!(start_of(Period::OneYear, day(2024, 2, 29)), ts(day(2023, 2, 28)));
    assert_eq!(start_of(Period::ThreeMonths, day(2024, 5, 31)), ts(day(2024, 2, 29)));
    assert_eq!(start_of(Period::SixMonths, day(2024, 8, 31)), ts(day(2024, 2, 29)));
}

#[test]
fn max_covers_all_data() {
    let stamps = daily(day(2021, 1, 1), day(2024, 1, 1));
    let range = resolve_range(&PeriodSelection::Named(Period::Max), &stamps).expect("range");
    assert_eq!(range, DateRange::new(stamps[0], stamps[stamps.len() - 1]));
}

#[test]
fn custom_range_is_inclusive_on_both_ends() {
    let stamps = daily(day(2024, 1, 1), day(2024, 1, 31));
    let points: Vec<PricePoint> = stamps.iter().map(|t| PricePoint::new(*t, Price::from(1.0))).collect();
    let selection = PeriodSelection::Custom { start: Some(day(2024, 1, 10)), end: Some(day(2024, 1, 12)) };

    let range = resolve_range(&selection, &stamps);
    let kept = filter_by_range(&points, range);
    let kept: Vec<Timestamp> = kept.iter().map(|p| p.timestamp).collect();
    assert_eq!(kept, vec![ts(day(2024, 1, 10)), ts(day(2024, 1, 11)), ts(day(2024, 1, 12))]);
}

#[test]
fn inverted_custom_range_keeps_nothing() {
    let stamps = daily(day(2024, 1, 1), day(2024, 1, 31));
    let points: Vec<PricePoint> = stamps.iter().map(|t| PricePoint::new(*t, Price::from(1.0))).collect();
    let selection = PeriodSelection::Custom { start: Some(day(2024, 1, 20)), end: Some(day(2024, 1, 10)) };

    assert!(filter_by_range(&points, resolve_range(&selection, &stamps)).is_empty());
}

#[quickcheck]
fn full_range_filter_is_identity(gaps: Vec<u8>) -> bool {
    let mut date = day(2010, 1, 4);
    let mut points = Vec::with_capacity(gaps.len());
    for (i, gap) in gaps.iter().enumerate() {
        date = date + Days::new(u64::from(*gap % 5) + 1);
        points.push(PricePoint::new(ts(date), Price::from(i as f64)));
    }
    let stamps: Vec<Timestamp> = points.iter().map(|p| p.timestamp).collect();

    let range = resolve_range(&PeriodSelection::Named(Period::Max), &stamps);
    filter_by_range(&points, range) == points
}
