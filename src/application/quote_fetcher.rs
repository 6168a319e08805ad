use crate::domain::{
    errors::QuoteError,
    events::{DomainEvent, MarketDataEvent},
    logging::{LogComponent, get_logger},
    market_data::{QuoteRequest, QuoteResponse, QuoteSource, Symbol},
    state::ViewStatus,
};

const COMPONENT: LogComponent = LogComponent::Application("QuoteFetcher");

/// What the fetcher exposes to the shell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchState {
    /// Latest accepted payload. Kept across a new request until it completes.
    pub data: Option<QuoteResponse>,
    pub loading: bool,
    /// Transport-class failure of the latest request
    pub error: Option<String>,
}

impl FetchState {
    pub fn status(&self, symbol: &Symbol) -> ViewStatus {
        ViewStatus::resolve(self.loading, self.error.as_deref(), self.data.as_ref(), symbol)
    }
}

/// Handle for one in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: QuoteRequest,
}

/// Keeps one logical request outstanding per symbol.
///
/// Every [`QuoteFetcher::begin`] bumps a generation counter. A completion is only
/// applied if it carries the latest generation, so a slow answer for an old symbol
/// cannot overwrite the data for the current one. The superseded request itself is
/// not aborted.
#[derive(Debug, Clone, Default)]
pub struct QuoteFetcher {
    params: Vec<(String, String)>,
    latest_generation: u64,
    state: FetchState,
}

impl QuoteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra provider parameters added to every request, e.g. `outputsize=full`
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn begin(&mut self, symbol: &Symbol) -> FetchTicket {
        self.latest_generation += 1;
        self.state.loading = true;
        self.state.error = None;

        let request = self
            .params
            .iter()
            .fold(QuoteRequest::daily(symbol.clone()), |req, (k, v)| req.with_param(k.clone(), v.clone()));
        let event = MarketDataEvent::QuoteRequested { symbol: symbol.clone(), generation: self.latest_generation };
        get_logger().info(COMPONENT, &format!("{} {:?}", event.event_type(), event));

        FetchTicket { generation: self.latest_generation, request }
    }

    /// Apply a completion. Stale completions leave the state untouched.
    pub fn finish(&mut self, ticket: &FetchTicket, result: Result<QuoteResponse, QuoteError>) -> MarketDataEvent {
        let symbol = ticket.request.symbol.clone();
        let generation = ticket.generation;

        if generation != self.latest_generation {
            let event = MarketDataEvent::StaleResponseDiscarded { symbol, generation, latest: self.latest_generation };
            get_logger().warn(COMPONENT, &format!("{} {:?}", event.event_type(), event));
            return event;
        }

        self.state.loading = false;
        let event = match result {
            Ok(payload) => {
                let records = payload.time_series.as_ref().map_or(0, |series| series.len());
                self.state.data = Some(payload);
                MarketDataEvent::QuoteLoaded { symbol, generation, records }
            }
            Err(error) => {
                let reason = error.to_string();
                self.state.error = Some(reason.clone());
                MarketDataEvent::QuoteFailed { symbol, generation, reason }
            }
        };

        match &event {
            MarketDataEvent::QuoteFailed { .. } => crate::log_error!(COMPONENT, "{:?}", event),
            _ => get_logger().info(COMPONENT, &format!("{} {:?}", event.event_type(), event)),
        }
        event
    }

    /// Begin, await `source` and finish in one go.
    pub async fn fetch<S: QuoteSource>(&mut self, source: &S, symbol: &Symbol) -> MarketDataEvent {
        let ticket = self.begin(symbol);
        let result = source.fetch_quote(ticket.request.clone()).await;
        self.finish(&ticket, result)
    }
}
