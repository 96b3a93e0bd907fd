//! Transport seam and the reqwest-backed HTTP transport

use crate::config::ClientConfig;
use crate::request::SignedRequest;
use crate::{CcPaymentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

/// Why a delivery failed. `payload` is the raw error body or message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub status: Option<u16>,
    pub payload: String,
}

impl TransportFailure {
    pub fn new(status: Option<u16>, payload: impl Into<String>) -> Self {
        Self {
            status,
            payload: payload.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {}: {}", status, self.payload),
            None => write!(f, "{}", self.payload),
        }
    }
}

impl From<TransportFailure> for CcPaymentError {
    fn from(failure: TransportFailure) -> Self {
        CcPaymentError::transport(failure.status, failure.payload)
    }
}

/// Delivers a signed request and returns the raw success payload
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &SignedRequest) -> std::result::Result<String, TransportFailure>;
}

/// HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport honouring the config's timeout
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| CcPaymentError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &SignedRequest) -> std::result::Result<String, TransportFailure> {
        let headers = request
            .headers()
            .map_err(|e| TransportFailure::new(None, e.to_string()))?;

        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| TransportFailure::new(None, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportFailure::new(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            return Err(TransportFailure::new(Some(status.as_u16()), text));
        }

        Ok(text)
    }
}
