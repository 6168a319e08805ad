use super::entities::QuoteResponse;
use super::value_objects::{SeriesFunction, Symbol};
use crate::domain::errors::QuoteError;
use futures::future::LocalBoxFuture;

/// One request to the quote provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub function: SeriesFunction,
    pub symbol: Symbol,
    /// Extra query parameters, appended in order after the required ones
    pub params: Vec<(String, String)>,
}

impl QuoteRequest {
    pub fn daily(symbol: Symbol) -> Self {
        Self { function: SeriesFunction::Daily, symbol, params: Vec::new() }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Source of quote payloads.
///
/// `Ok` means the provider answered with a JSON body, which may still carry a soft
/// error; `Err` is a transport or decode failure. Futures are not `Send`: the
/// browser runs everything on one thread.
pub trait QuoteSource {
    fn fetch_quote(&self, request: QuoteRequest) -> LocalBoxFuture<'static, Result<QuoteResponse, QuoteError>>;
}
