//! Browser-facing adapters: provider HTTP client, configuration and console logging.

pub mod config;
pub mod http;
pub mod services;

pub use config::ProviderConfig;
pub use http::AlphaVantageClient;
