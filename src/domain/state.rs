use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::chart::{Period, PeriodSelection};
use crate::domain::events::{DashboardEvent, DomainEvent};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{QuoteResponse, Symbol, Timestamp, is_valid_symbol, validate_window};

const COMPONENT: LogComponent = LogComponent::Domain("DashboardState");

/// What the caller must do after an event has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Committed symbol changed: issue a new request
    Fetch(Symbol),
    /// Range or overlays changed: re-derive the chart from the current payload
    Recompose,
    /// Only the hover panel changed
    Redisplay,
}

/// Presentation shell state. All transitions go through [`DashboardState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Last valid symbol; the one being fetched and charted
    pub symbol: Symbol,
    /// Text in the input box, uppercased, possibly invalid
    pub symbol_draft: String,
    pub period: Period,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    pub sma_windows: BTreeSet<usize>,
    pub hover: Option<Timestamp>,
}

impl Default for DashboardState {
    fn default() -> Self {
        let symbol = Symbol::default();
        Self {
            symbol_draft: symbol.value().to_string(),
            symbol,
            period: Period::default(),
            custom_start: None,
            custom_end: None,
            sma_windows: BTreeSet::new(),
            hover: None,
        }
    }
}

impl DashboardState {
    pub fn apply(&mut self, event: DashboardEvent) -> Effect {
        crate::log_trace!(COMPONENT, "applying {}", event.event_type());
        match event {
            DashboardEvent::SymbolTyped(text) => {
                self.symbol_draft = text.trim().to_uppercase();
                match Symbol::new(&self.symbol_draft) {
                    Ok(symbol) => self.commit_symbol(symbol),
                    Err(_) => Effect::None,
                }
            }
            DashboardEvent::SymbolPicked(symbol) => {
                self.symbol_draft = symbol.value().to_string();
                self.commit_symbol(symbol)
            }
            DashboardEvent::SmaToggled(window) => {
                if let Err(err) = validate_window(window) {
                    crate::log_warn!(COMPONENT, "ignoring SMA toggle: {}", err);
                    return Effect::None;
                }
                if !self.sma_windows.remove(&window) {
                    self.sma_windows.insert(window);
                }
                Effect::Recompose
            }
            DashboardEvent::PeriodSelected(period) => {
                if self.period == period {
                    return Effect::None;
                }
                self.period = period;
                Effect::Recompose
            }
            DashboardEvent::CustomStartChanged(date) => self.set_custom_bound(date, true),
            DashboardEvent::CustomEndChanged(date) => self.set_custom_bound(date, false),
            DashboardEvent::Hover { timestamp } => {
                self.hover = Some(timestamp);
                Effect::Redisplay
            }
            DashboardEvent::HoverCleared => {
                if self.hover.take().is_some() { Effect::Redisplay } else { Effect::None }
            }
        }
    }

    fn commit_symbol(&mut self, symbol: Symbol) -> Effect {
        if symbol == self.symbol {
            return Effect::None;
        }
        crate::log_info!(COMPONENT, "symbol changed {} -> {}", self.symbol, symbol);
        self.symbol = symbol.clone();
        self.hover = None;
        Effect::Fetch(symbol)
    }

    fn set_custom_bound(&mut self, date: Option<NaiveDate>, start: bool) -> Effect {
        let slot = if start { &mut self.custom_start } else { &mut self.custom_end };
        if *slot == date {
            return Effect::None;
        }
        *slot = date;
        // Bounds only matter while the custom period is active.
        if self.period == Period::Custom { Effect::Recompose } else { Effect::None }
    }

    pub fn draft_is_valid(&self) -> bool {
        is_valid_symbol(&self.symbol_draft)
    }

    pub fn selection(&self) -> PeriodSelection {
        match self.period {
            Period::Custom => PeriodSelection::Custom { start: self.custom_start, end: self.custom_end },
            named => PeriodSelection::Named(named),
        }
    }
}

/// Which one thing the dashboard shows. Checked in a fixed order:
/// loading, transport error, no payload, soft error, missing series, chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    TransportError(String),
    SoftError(String),
    NoSeries(Symbol),
    NoData,
    Chart,
}

impl ViewStatus {
    pub fn resolve(loading: bool, error: Option<&str>, data: Option<&QuoteResponse>, symbol: &Symbol) -> Self {
        if loading {
            return ViewStatus::Loading;
        }
        if let Some(error) = error {
            return ViewStatus::TransportError(error.to_string());
        }
        let Some(data) = data else {
            return ViewStatus::NoData;
        };
        if let Some(soft) = data.soft_error() {
            return ViewStatus::SoftError(soft.to_string());
        }
        if !data.has_series() {
            return ViewStatus::NoSeries(symbol.clone());
        }
        ViewStatus::Chart
    }

    /// Text shown in place of the chart
    pub fn message(&self) -> Option<String> {
        match self {
            ViewStatus::Loading => Some("Loading...".to_string()),
            ViewStatus::TransportError(error) => Some(format!("Error: {error}")),
            ViewStatus::SoftError(message) => Some(message.clone()),
            ViewStatus::NoSeries(symbol) => Some(format!("No data found for symbol \"{symbol}\".")),
            ViewStatus::NoData => Some("No data available.".to_string()),
            ViewStatus::Chart => None,
        }
    }

    /// Messages rendered red
    pub fn is_alert(&self) -> bool {
        matches!(self, ViewStatus::TransportError(_) | ViewStatus::SoftError(_) | ViewStatus::NoSeries(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_load() {
        let state = DashboardState::default();
        assert_eq!(state.symbol.value(), "AAPL");
        assert_eq!(state.period, Period::OneYear);
        assert!(state.sma_windows.is_empty());
        assert_eq!(state.hover, None);
    }

    #[test]
    fn half_typed_symbol_is_not_committed() {
        let mut state = DashboardState::default();
        assert_eq!(state.apply(DashboardEvent::SymbolTyped("ms1".into())), Effect::None);
        assert_eq!(state.symbol_draft, "MS1");
        assert!(!state.draft_is_valid());
        assert_eq!(state.symbol.value(), "AAPL");
    }

    #[test]
    fn zero_sma_window_is_ignored() {
        let mut state = DashboardState::default();
        assert_eq!(state.apply(DashboardEvent::SmaToggled(0)), Effect::None);
        assert!(state.sma_windows.is_empty());
        assert_eq!(state.apply(DashboardEvent::SmaToggled(10)), Effect::Recompose);
        assert_eq!(state.sma_windows.iter().copied().collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn custom_bounds_are_inert_outside_custom_period() {
        let mut state = DashboardState::default();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(state.apply(DashboardEvent::CustomStartChanged(date)), Effect::None);
        assert_eq!(state.apply(DashboardEvent::PeriodSelected(Period::Custom)), Effect::Recompose);
        assert_eq!(state.selection(), PeriodSelection::Custom { start: date, end: None });
    }
}
