use thiserror::Error;

/// Everything that can go wrong between issuing a quote request and holding a usable payload.
///
/// `Transport` and `Decode` are hard failures of the request itself. The remaining
/// variants are soft errors: the provider answered with HTTP 200 but put an error
/// field into the body instead of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("{0}")]
    Transport(String),
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    /// `"Note"` field, usually the free-tier rate limit
    #[error("{0}")]
    RateLimited(String),
    /// `"Error Message"` field, usually an unknown symbol
    #[error("{0}")]
    InvalidSymbol(String),
    /// `"Information"` field, sent for key and plan problems
    #[error("{0}")]
    Advisory(String),
}

impl QuoteError {
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            QuoteError::RateLimited(_) | QuoteError::InvalidSymbol(_) | QuoteError::Advisory(_)
        )
    }
}

/// Rejected user input. None of these reach the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid symbol {0:?}: expected 1 to 8 letters A-Z")]
    InvalidSymbol(String),
    #[error("moving average window must be at least 1, got {0}")]
    InvalidWindow(usize),
    #[error("unknown period {0:?}")]
    UnknownPeriod(String),
}
