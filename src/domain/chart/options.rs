//! Declarative chart configuration, serialized as-is for the external renderer.
//!
//! Key names follow the renderer's option tree (camelCase). Data rows are tuples
//! so they serialize as `[x, y]` / `[x, o, h, l, c]`; NaN becomes `null`, which the
//! renderer leaves as a gap.

use serde::Serialize;

/// Stable series ids used to route point events back to the shell.
pub const PRICE_SERIES_ID: &str = "price";
pub const OHLC_SERIES_ID: &str = "ohlc";
pub const VOLUME_SERIES_ID: &str = "volume";

pub fn sma_series_id(window: usize) -> String {
    format!("sma-{window}")
}

pub const PRICE_AXIS: usize = 0;
pub const VOLUME_AXIS: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: TitleOptions,
    pub chart: FrameOptions,
    pub x_axis: AxisOptions,
    pub y_axis: Vec<AxisOptions>,
    pub tooltip: TooltipOptions,
    pub plot_options: PlotOptions,
    pub time: TimeOptions,
    pub series: Vec<SeriesOptions>,
}

impl ChartOptions {
    pub fn series_by_id(&self, id: &str) -> Option<&SeriesOptions> {
        self.series.iter().find(|s| s.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub text: String,
}

impl TitleOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOptions {
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOptions>,
    /// Pane placement, e.g. `"70%"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub enabled: bool,
    pub shared: bool,
    pub split: bool,
}

/// Options shared by every series
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlotOptions {
    pub series: SeriesPlotOptions,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPlotOptions {
    pub data_grouping: DataGrouping,
}

/// Grouping merges neighbouring days into one point and moves its x, so hovers
/// would no longer land on a day timestamp. Kept off.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataGrouping {
    pub enabled: bool,
}

/// Day timestamps are local midnight, so the renderer must not format them as UTC.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeOptions {
    #[serde(rename = "useUTC")]
    pub use_utc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeriesOptions {
    Line(LineSeries),
    Candlestick(CandlestickSeries),
    Column(ColumnSeries),
}

impl SeriesOptions {
    pub fn id(&self) -> &str {
        match self {
            SeriesOptions::Line(s) => &s.id,
            SeriesOptions::Candlestick(s) => &s.id,
            SeriesOptions::Column(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SeriesOptions::Line(s) => &s.name,
            SeriesOptions::Candlestick(s) => &s.name,
            SeriesOptions::Column(s) => &s.name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesOptions::Line(s) => s.data.len(),
            SeriesOptions::Candlestick(s) => s.data.len(),
            SeriesOptions::Column(s) => s.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub id: String,
    pub name: String,
    pub data: Vec<(i64, f64)>,
    pub y_axis: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_style: Option<String>,
    pub enable_mouse_tracking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickSeries {
    pub id: String,
    pub name: String,
    pub data: Vec<(i64, f64, f64, f64, f64)>,
    pub y_axis: usize,
    pub enable_mouse_tracking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSeries {
    pub id: String,
    pub name: String,
    pub data: Vec<(i64, f64)>,
    pub y_axis: usize,
    pub enable_mouse_tracking: bool,
}
