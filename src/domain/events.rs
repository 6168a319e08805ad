use crate::domain::chart::Period;
use crate::domain::market_data::{Symbol, Timestamp};
use chrono::NaiveDate;
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// User input reaching the dashboard state machine
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Raw text typed into the symbol box
    SymbolTyped(String),
    /// Autocomplete entry picked
    SymbolPicked(Symbol),
    SmaToggled(usize),
    PeriodSelected(Period),
    CustomStartChanged(Option<NaiveDate>),
    CustomEndChanged(Option<NaiveDate>),
    Hover { timestamp: Timestamp },
    HoverCleared,
}

impl DomainEvent for DashboardEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::SymbolTyped(_) => "SymbolTyped",
            DashboardEvent::SymbolPicked(_) => "SymbolPicked",
            DashboardEvent::SmaToggled(_) => "SmaToggled",
            DashboardEvent::PeriodSelected(_) => "PeriodSelected",
            DashboardEvent::CustomStartChanged(_) => "CustomStartChanged",
            DashboardEvent::CustomEndChanged(_) => "CustomEndChanged",
            DashboardEvent::Hover { .. } => "Hover",
            DashboardEvent::HoverCleared => "HoverCleared",
        }
    }
}

/// Fetch lifecycle, as seen by the quote fetcher
#[derive(Debug, Clone, PartialEq)]
pub enum MarketDataEvent {
    QuoteRequested { symbol: Symbol, generation: u64 },
    QuoteLoaded { symbol: Symbol, generation: u64, records: usize },
    QuoteFailed { symbol: Symbol, generation: u64, reason: String },
    StaleResponseDiscarded { symbol: Symbol, generation: u64, latest: u64 },
}

impl DomainEvent for MarketDataEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MarketDataEvent::QuoteRequested { .. } => "QuoteRequested",
            MarketDataEvent::QuoteLoaded { .. } => "QuoteLoaded",
            MarketDataEvent::QuoteFailed { .. } => "QuoteFailed",
            MarketDataEvent::StaleResponseDiscarded { .. } => "StaleResponseDiscarded",
        }
    }
}
