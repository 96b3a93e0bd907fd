//! Client configuration

use crate::{CcPaymentError, Result};
use std::time::Duration;

/// Default CCPayment API base URL
pub const DEFAULT_API_URL: &str = "https://admin.ccpayment.com/ccpayment/v1/";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "CCPAYMENT_API_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CCPAYMENT_TIMEOUT_SECS";
/// Environment variable holding the timestamp threshold in seconds
pub const ENV_TIMESTAMP_THRESHOLD: &str = "CCPAYMENT_TIMESTAMP_THRESHOLD";

/// Configuration owned by a [`crate::CcPaymentClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Request timeout handed to the HTTP transport
    pub timeout: Option<Duration>,
    /// Seconds added to every request timestamp
    pub timestamp_threshold: i64,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            timestamp_threshold: 0,
        }
    }

    /// Build a config from `CCPAYMENT_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        use std::env;

        let base_url = env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url);

        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CcPaymentError::config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(raw) = env::var(ENV_TIMESTAMP_THRESHOLD) {
            config.timestamp_threshold = raw.trim().parse().map_err(|_| {
                CcPaymentError::config(format!(
                    "{ENV_TIMESTAMP_THRESHOLD} must be an integer, got '{raw}'"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(CcPaymentError::config("API base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CcPaymentError::config(
                "API base URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| CcPaymentError::config(format!("Invalid API base URL: {e}")))?;

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timestamp threshold (clock-skew allowance, in seconds)
    pub fn with_timestamp_threshold(mut self, threshold: i64) -> Self {
        self.timestamp_threshold = threshold;
        self
    }

    /// Join a request path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
