pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Provider settings, injected into the HTTP client at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    /// Appended to every request after the request's own parameters
    pub extra_params: Vec<(String, String)>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string(), extra_params: Vec::new() }
    }

    /// Key from `ALPHA_VANTAGE_KEY`, baked in at compile time; the browser has no process environment.
    /// A missing key is sent as an empty `apikey` and rejected by the provider.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("ALPHA_VANTAGE_KEY").unwrap_or_default())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
