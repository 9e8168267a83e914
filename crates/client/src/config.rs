//! Client configuration.

use std::time::Duration;

use finprod_observability::LogFormat;

use crate::pagination::PageSize;

pub const ENV_API_URL: &str = "FINPROD_API_URL";
pub const ENV_DEBOUNCE_MS: &str = "FINPROD_DEBOUNCE_MS";
pub const ENV_LOG_FORMAT: &str = "FINPROD_LOG_FORMAT";

/// Settings shared by the controllers and the HTTP store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the product API (no trailing slash).
    pub api_url: String,
    /// Path of the products collection.
    pub products_path: String,
    /// Path prefix of the id verification endpoint.
    pub verification_path: String,
    /// Quiet period before a uniqueness check is sent.
    pub uniqueness_debounce: Duration,
    /// Delay between a successful submit and navigating away from the form.
    pub navigate_delay: Duration,
    /// Page size a fresh list starts with.
    pub default_page_size: PageSize,
    /// Log line encoding for binaries.
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3002".to_string(),
            products_path: "/bp/products".to_string(),
            verification_path: "/bp/products/verification".to_string(),
            uniqueness_debounce: Duration::from_millis(500),
            navigate_delay: Duration::from_millis(1500),
            default_page_size: PageSize::Five,
            log_format: LogFormat::Json,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FINPROD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_api_url(url);
        }

        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.uniqueness_debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!(
                    value = %raw,
                    "{ENV_DEBOUNCE_MS} is not a number of milliseconds; using default"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            match LogFormat::parse(&raw) {
                Some(format) => config.log_format = format,
                None => tracing::warn!(value = %raw, "{ENV_LOG_FORMAT} is not json|compact; using default"),
            }
        }

        config
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_uniqueness_debounce(mut self, debounce: Duration) -> Self {
        self.uniqueness_debounce = debounce;
        self
    }

    pub fn with_navigate_delay(mut self, delay: Duration) -> Self {
        self.navigate_delay = delay;
        self
    }

    pub fn with_default_page_size(mut self, size: PageSize) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn products_url(&self) -> String {
        format!("{}{}", self.api_url, self.products_path)
    }

    pub fn product_url(&self, id: &str) -> String {
        format!("{}/{}", self.products_url(), id)
    }

    pub fn verification_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.api_url, self.verification_path, id)
    }
}
