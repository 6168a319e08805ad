use super::quote_fetcher::{FetchState, FetchTicket, QuoteFetcher};
use crate::domain::{
    chart::{ChartInput, ComposedChart, DateRange, OhlcDisplay, chart_title, compose, filter_by_range, hover_event, resolve_range},
    errors::QuoteError,
    events::{DashboardEvent, MarketDataEvent},
    logging::LogComponent,
    market_data::{InputKey, MovingAverageSet, NormalizedSeries, QuoteResponse, normalize},
    state::{DashboardState, Effect, ViewStatus},
};

const COMPONENT: LogComponent = LogComponent::Application("Dashboard");

/// Result of feeding one event to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub effect: Effect,
    /// Present when the event requires a new provider request
    pub ticket: Option<FetchTicket>,
}

/// Everything the chart area needs for one render
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub status: ViewStatus,
    pub range: Option<DateRange>,
    pub chart: Option<ComposedChart>,
}

/// Application service tying the shell state, the fetcher and the analytics pipeline.
///
/// Derived series are rebuilt from the held payload on demand and never patched in
/// place; only the SMA overlays are memoised, keyed by the filtered input.
#[derive(Debug, Clone, Default)]
pub struct DashboardService {
    state: DashboardState,
    fetcher: QuoteFetcher,
    series: NormalizedSeries,
    series_generation: u64,
    moving_averages: MovingAverageSet,
}

impl DashboardService {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self { fetcher, ..Default::default() }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.fetcher.state()
    }

    pub fn series(&self) -> &NormalizedSeries {
        &self.series
    }

    /// Request for the initial symbol
    pub fn start(&mut self) -> FetchTicket {
        self.fetcher.begin(&self.state.symbol)
    }

    pub fn dispatch(&mut self, event: DashboardEvent) -> DispatchOutcome {
        let effect = self.state.apply(event);
        let ticket = match &effect {
            Effect::Fetch(symbol) => Some(self.fetcher.begin(symbol)),
            _ => None,
        };
        DispatchOutcome { effect, ticket }
    }

    /// Hand a completed request back. Accepted payloads are normalized right away.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<QuoteResponse, QuoteError>) -> MarketDataEvent {
        let event = self.fetcher.finish(ticket, result);
        if let MarketDataEvent::QuoteLoaded { generation, .. } = &event {
            let state = self.fetcher.state();
            self.series = state.data.as_ref().map(normalize).unwrap_or_default();
            self.series_generation = *generation;
            crate::log_debug!(COMPONENT, "holding {} days for generation {}", self.series.len(), generation);
        }
        event
    }

    /// Point event from the renderer. Returns whether the hover panel changed.
    pub fn hover(&mut self, series_id: &str, x: f64) -> bool {
        match hover_event(series_id, x, &self.series.lookup) {
            Some(event) => self.state.apply(event) == Effect::Redisplay,
            None => false,
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.fetcher.state().status(&self.state.symbol)
    }

    /// Hovered day, or the newest day of the held payload
    pub fn ohlc_display(&self) -> Option<OhlcDisplay> {
        OhlcDisplay::resolve(self.state.hover, &self.series.lookup)
    }

    pub fn chart_view(&mut self) -> ChartView {
        let title = chart_title(&self.state.symbol);
        let status = self.status();
        if status != ViewStatus::Chart {
            return ChartView { title, status, range: None, chart: None };
        }

        let range = resolve_range(&self.state.selection(), &self.series.timestamps());
        let prices = filter_by_range(&self.series.prices, range);
        let ohlc = filter_by_range(&self.series.ohlc, range);
        let volume = filter_by_range(&self.series.volume, range);

        self.moving_averages.sync(InputKey::of(self.series_generation, &prices), &prices, &self.state.sma_windows);

        let chart = compose(&ChartInput {
            symbol: &self.state.symbol,
            prices: &prices,
            ohlc: &ohlc,
            volume: &volume,
            moving_averages: &self.moving_averages,
        });

        ChartView { title, status, range, chart: Some(chart) }
    }
}
