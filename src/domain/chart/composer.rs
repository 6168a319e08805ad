use std::collections::BTreeMap;
use std::fmt;

use super::options::{
    AxisOptions, CandlestickSeries, ChartOptions, ColumnSeries, FrameOptions, LineSeries, PlotOptions,
    SeriesOptions, TimeOptions, TitleOptions, TooltipOptions, OHLC_SERIES_ID, PRICE_AXIS, PRICE_SERIES_ID, VOLUME_AXIS, VOLUME_SERIES_ID,
    sma_series_id,
};
use crate::domain::events::DashboardEvent;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    MovingAverageSet, OhlcLookup, OhlcPoint, PricePoint, SmaSeries, Symbol, Timestamp, Volume, VolumePoint,
};
use crate::time_utils::format_date_label;

const COMPONENT: LogComponent = LogComponent::Domain("Composer");

pub const CHART_HEIGHT: u32 = 500;

/// Everything the composer needs, already range-filtered.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub symbol: &'a Symbol,
    pub prices: &'a [PricePoint],
    pub ohlc: &'a [OhlcPoint],
    pub volume: &'a [VolumePoint],
    pub moving_averages: &'a MovingAverageSet,
}

pub fn chart_title(symbol: &Symbol) -> String {
    format!("{} End of Day (EOD) Stock Price", symbol.value())
}

/// Renderer options plus the per-timestamp data the shared tooltip reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedChart {
    pub options: ChartOptions,
    ohlc: BTreeMap<Timestamp, OhlcPoint>,
    volume: BTreeMap<Timestamp, Volume>,
    moving_averages: Vec<SmaSeries>,
}

impl ComposedChart {
    /// Tooltip content at `timestamp`. Fields without a finite value are left out.
    pub fn tooltip(&self, timestamp: Timestamp) -> Tooltip {
        Tooltip {
            date: format_date_label(timestamp.value()),
            ohlc: self.ohlc.get(&timestamp).and_then(OhlcPoint::finite_quad),
            volume: self.volume.get(&timestamp).and_then(Volume::finite),
            moving_averages: self
                .moving_averages
                .iter()
                .filter_map(|sma| Some((sma.window, sma.value_at(timestamp)?.finite()?)))
                .collect(),
        }
    }

    pub fn sma_windows(&self) -> Vec<usize> {
        self.moving_averages.iter().map(|s| s.window).collect()
    }
}

/// Assemble price line, candlesticks, volume columns and one dashed line per
/// active SMA, in that order.
pub fn compose(input: &ChartInput<'_>) -> ComposedChart {
    let symbol = input.symbol.value();

    let mut series = vec![
        SeriesOptions::Line(LineSeries {
            id: PRICE_SERIES_ID.to_string(),
            name: format!("{symbol} Close Price"),
            data: input.prices.iter().map(|p| (p.timestamp.value(), p.close.value())).collect(),
            y_axis: PRICE_AXIS,
            dash_style: None,
            enable_mouse_tracking: true,
        }),
        SeriesOptions::Candlestick(CandlestickSeries {
            id: OHLC_SERIES_ID.to_string(),
            name: format!("{symbol} OHLC"),
            data: input
                .ohlc
                .iter()
                .map(|c| (c.timestamp.value(), c.open.value(), c.high.value(), c.low.value(), c.close.value()))
                .collect(),
            y_axis: PRICE_AXIS,
            enable_mouse_tracking: true,
        }),
        SeriesOptions::Column(ColumnSeries {
            id: VOLUME_SERIES_ID.to_string(),
            name: "Volume".to_string(),
            data: input.volume.iter().map(|v| (v.timestamp.value(), v.volume.value())).collect(),
            y_axis: VOLUME_AXIS,
            enable_mouse_tracking: false,
        }),
    ];

    series.extend(input.moving_averages.iter().map(|sma| {
        SeriesOptions::Line(LineSeries {
            id: sma_series_id(sma.window),
            name: format!("SMA {}", sma.window),
            data: sma.points.iter().map(|p| (p.timestamp.value(), p.close.value())).collect(),
            y_axis: PRICE_AXIS,
            dash_style: Some("ShortDash".to_string()),
            enable_mouse_tracking: false,
        })
    }));

    crate::log_debug!(
        COMPONENT,
        "composed {} series for {} ({} points)",
        series.len(),
        symbol,
        input.prices.len()
    );

    ComposedChart {
        options: ChartOptions {
            title: TitleOptions::new(chart_title(input.symbol)),
            chart: FrameOptions { height: CHART_HEIGHT },
            x_axis: AxisOptions { kind: Some("datetime".to_string()), ..Default::default() },
            y_axis: price_and_volume_axes(),
            tooltip: TooltipOptions { enabled: true, shared: true, split: false },
            plot_options: PlotOptions::default(),
            time: TimeOptions { use_utc: false },
            series,
        },
        ohlc: input.ohlc.iter().map(|c| (c.timestamp, *c)).collect(),
        volume: input.volume.iter().map(|v| (v.timestamp, v.volume)).collect(),
        moving_averages: input.moving_averages.iter().cloned().collect(),
    }
}

/// Price pane on top, volume pane underneath
fn price_and_volume_axes() -> Vec<AxisOptions> {
    vec![
        AxisOptions {
            title: Some(TitleOptions::new("Price (USD)")),
            height: Some("70%".to_string()),
            ..Default::default()
        },
        AxisOptions {
            title: Some(TitleOptions::new("Volume")),
            top: Some("72%".to_string()),
            height: Some("28%".to_string()),
            offset: Some(0),
            ..Default::default()
        },
    ]
}

/// Translate a renderer point event into a hover event. Only the price line and
/// the candlesticks publish hovers, and only for days present in `lookup`.
pub fn hover_event(series_id: &str, x: f64, lookup: &OhlcLookup) -> Option<DashboardEvent> {
    if series_id != PRICE_SERIES_ID && series_id != OHLC_SERIES_ID {
        return None;
    }
    let timestamp = Timestamp::from_chart_x(x)?;
    lookup.contains(timestamp).then_some(DashboardEvent::Hover { timestamp })
}

/// Shared tooltip content for one day
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub date: String,
    /// Open, high, low, close
    pub ohlc: Option<[f64; 4]>,
    pub volume: Option<f64>,
    /// `(window, value)` in ascending window order
    pub moving_averages: Vec<(usize, f64)>,
}

impl Tooltip {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.date.clone()];
        if let Some([open, high, low, close]) = self.ohlc {
            lines.push(format!("O: {open:.2}  H: {high:.2}  L: {low:.2}  C: {close:.2}"));
        }
        if let Some(volume) = self.volume {
            lines.push(format!("Volume: {volume:.0}"));
        }
        lines.extend(self.moving_averages.iter().map(|(window, value)| format!("SMA {window}: {value:.2}")));
        lines
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
