use std::collections::BTreeSet;

use stock_eod_dashboard::domain::chart::{
    CHART_HEIGHT, ChartInput, ComposedChart, OHLC_SERIES_ID, PRICE_SERIES_ID, SeriesOptions, compose, hover_event,
};
use stock_eod_dashboard::domain::events::DashboardEvent;
use stock_eod_dashboard::domain::market_data::{
    InputKey, MovingAverageSet, OhlcLookup, OhlcPoint, Price, PricePoint, RawDailyRecord, Symbol, Timestamp, Volume,
    VolumePoint,
};

const DAY: i64 = 86_400_000;

fn ts(i: i64) -> Timestamp {
    Timestamp::from_millis(i * DAY)
}

fn fixture(volumes: &[f64], windows: &[usize]) -> ComposedChart {
    let symbol = Symbol::new("IBM").expect("valid");
    let prices: Vec<PricePoint> =
        (0..volumes.len() as i64).map(|i| PricePoint::new(ts(i), Price::from(10.0 + i as f64))).collect();
    let ohlc: Vec<OhlcPoint> = prices
        .iter()
        .map(|p| OhlcPoint {
            timestamp: p.timestamp,
            open: Price::from(p.close.value() - 0.5),
            high: Price::from(p.close.value() + 1.0),
            low: Price::from(p.close.value() - 1.0),
            close: p.close,
        })
        .collect();
    let volume: Vec<VolumePoint> =
        prices.iter().zip(volumes).map(|(p, v)| VolumePoint { timestamp: p.timestamp, volume: Volume::from(*v) }).collect();

    let mut averages = MovingAverageSet::new();
    averages.sync(InputKey::of(1, &prices), &prices, &windows.iter().copied().collect::<BTreeSet<_>>());

    compose(&ChartInput { symbol: &symbol, prices: &prices, ohlc: &ohlc, volume: &volume, moving_averages: &averages })
}

#[test]
fn series_come_in_a_fixed_order() {
    let chart = fixture(&[100.0, 200.0, 300.0], &[20, 2]);
    let ids: Vec<&str> = chart.options.series.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["price", "ohlc", "volume", "sma-2", "sma-20"]);

    assert_eq!(chart.options.title.text, "IBM End of Day (EOD) Stock Price");
    assert_eq!(chart.options.chart.height, CHART_HEIGHT);
    match chart.options.series_by_id("sma-2") {
        Some(SeriesOptions::Line(line)) => {
            assert_eq!(line.name, "SMA 2");
            assert_eq!(line.dash_style.as_deref(), Some("ShortDash"));
            assert!(!line.enable_mouse_tracking);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn axes_layout() {
    let chart = fixture(&[100.0], &[]);
    insta::assert_json_snapshot!("axes_layout", chart.options.y_axis);
}

#[test]
fn options_serialize_in_renderer_shape() {
    let chart = fixture(&[100.0, f64::NAN], &[]);
    let json = serde_json::to_value(&chart.options).expect("serializable");

    assert_eq!(json["xAxis"]["type"], "datetime");
    assert_eq!(json["tooltip"]["shared"], true);
    assert_eq!(json["series"][0]["type"], "line");
    assert_eq!(json["series"][1]["type"], "candlestick");
    assert_eq!(json["series"][2]["type"], "column");
    assert_eq!(json["series"][2]["yAxis"], 1);
    assert_eq!(json["series"][1]["data"][0], serde_json::json!([0, 9.5, 11.0, 9.0, 10.0]));
    // NaN leaves a gap
    assert!(json["series"][2]["data"][1][1].is_null());
}

#[test]
fn renderer_keeps_day_points_and_local_time() {
    let chart = fixture(&[100.0, 200.0], &[]);
    let json = serde_json::to_value(&chart.options).expect("serializable");

    assert_eq!(json["plotOptions"]["series"]["dataGrouping"]["enabled"], false);
    assert_eq!(json["time"], serde_json::json!({ "useUTC": false }));
    assert_eq!(json["series"][0]["data"][1][0], DAY);
}

#[test]
fn tooltip_lists_every_available_field() {
    let chart = fixture(&[1234.0, 5678.0], &[2]);
    let tooltip = chart.tooltip(ts(1));

    assert_eq!(tooltip.ohlc, Some([10.5, 12.0, 10.0, 11.0]));
    assert_eq!(tooltip.volume, Some(5678.0));
    assert_eq!(tooltip.moving_averages, vec![(2, 10.5)]);
    let lines = tooltip.lines();
    assert_eq!(&lines[1..], ["O: 10.50  H: 12.00  L: 10.00  C: 11.00", "Volume: 5678", "SMA 2: 10.50"]);
}

#[test]
fn tooltip_omits_missing_fields() {
    let chart = fixture(&[f64::NAN, 5678.0], &[2]);
    let tooltip = chart.tooltip(ts(0));

    assert!(tooltip.ohlc.is_some());
    assert_eq!(tooltip.volume, None);
    // the first day has no full window yet
    assert!(tooltip.moving_averages.is_empty());
    assert_eq!(tooltip.lines().len(), 2);

    let unknown = chart.tooltip(ts(9));
    assert_eq!(unknown.lines().len(), 1);
}

#[test]
fn only_price_and_candles_publish_hovers() {
    let mut lookup = OhlcLookup::default();
    lookup.insert(ts(3), RawDailyRecord::new("1", "2", "0", "1", "10"));
    let x = (3 * DAY) as f64;

    assert_eq!(hover_event(PRICE_SERIES_ID, x, &lookup), Some(DashboardEvent::Hover { timestamp: ts(3) }));
    assert_eq!(hover_event(OHLC_SERIES_ID, x, &lookup), Some(DashboardEvent::Hover { timestamp: ts(3) }));
    assert_eq!(hover_event("volume", x, &lookup), None);
    assert_eq!(hover_event("sma-10", x, &lookup), None);
    assert_eq!(hover_event(PRICE_SERIES_ID, (4 * DAY) as f64, &lookup), None);
    assert_eq!(hover_event(PRICE_SERIES_ID, f64::NAN, &lookup), None);
}
