use crate::domain::{
    errors::QuoteError,
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{QuoteRequest, QuoteResponse, QuoteSource},
};
use crate::infrastructure::config::ProviderConfig;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;

const COMPONENT: LogComponent = LogComponent::Infrastructure("AlphaVantage");

/// Message for a non-2xx answer
pub const NOT_OK_MESSAGE: &str = "Network response was not ok";

/// HTTP client for the Alpha Vantage query endpoint
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    config: ProviderConfig,
}

impl AlphaVantageClient {
    pub fn new(config: ProviderConfig) -> Self {
        if !config.has_api_key() {
            get_logger().warn(COMPONENT, "no API key configured; the provider will reject requests");
        }
        Self { config }
    }

    /// `function`, `symbol`, `apikey`, then request params, then configured params.
    pub fn query_pairs(&self, request: &QuoteRequest) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("function".to_string(), request.function.as_ref().to_string()),
            ("symbol".to_string(), request.symbol.value().to_string()),
            ("apikey".to_string(), self.config.api_key.clone()),
        ];
        pairs.extend(request.params.iter().cloned());
        pairs.extend(self.config.extra_params.iter().cloned());
        pairs
    }

    /// Issue the request. Soft errors in the body are returned as `Ok`; the caller
    /// decides how to show them.
    pub async fn fetch(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
        get_logger().info(
            COMPONENT,
            &format!("📈 Fetching {} for {}", request.function.as_ref(), request.symbol.value()),
        );

        let pairs = self.query_pairs(request);
        let response = Request::get(&self.config.base_url)
            .query(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        if !response.ok() {
            get_logger().log_with_metadata(
                LogLevel::Error,
                COMPONENT,
                NOT_OK_MESSAGE,
                &format!("status={} {}", response.status(), response.status_text()),
            );
            return Err(QuoteError::Transport(NOT_OK_MESSAGE.to_string()));
        }

        let payload: QuoteResponse =
            response.json().await.map_err(|e| QuoteError::Decode(e.to_string()))?;

        match payload.soft_error() {
            Some(soft) => get_logger().warn(COMPONENT, &format!("provider answered with: {soft}")),
            None => get_logger().info(
                COMPONENT,
                &format!(
                    "✅ Loaded {} daily records",
                    payload.time_series.as_ref().map_or(0, |series| series.len())
                ),
            ),
        }

        Ok(payload)
    }
}

impl QuoteSource for AlphaVantageClient {
    fn fetch_quote(&self, request: QuoteRequest) -> LocalBoxFuture<'static, Result<QuoteResponse, QuoteError>> {
        let client = self.clone();
        async move { client.fetch(&request).await }.boxed_local()
    }
}
