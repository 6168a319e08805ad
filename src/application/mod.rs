//! Application layer: request orchestration and the dashboard pipeline.

pub mod dashboard;
pub mod quote_fetcher;

pub use dashboard::{ChartView, DashboardService, DispatchOutcome};
pub use quote_fetcher::{FetchState, FetchTicket, QuoteFetcher};
