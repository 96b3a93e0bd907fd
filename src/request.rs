//! Signed request construction

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::signer;
use crate::{CcPaymentError, Result};
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

/// Content type sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";
/// Header carrying the app ID
pub const APP_ID_HEADER: &str = "Appid";
/// Header carrying the request timestamp
pub const TIMESTAMP_HEADER: &str = "Timestamp";
/// Header carrying the request signature
pub const SIGN_HEADER: &str = "Sign";

/// A fully authenticated request, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Full target URL
    pub url: String,
    /// Path relative to the API base URL
    pub path: String,
    /// Serialized body; empty when the call has no body
    pub body: String,
    /// Unix seconds, threshold included
    pub timestamp: i64,
    /// Hex SHA-256 signature
    pub signature: String,
    /// App ID the request was signed for
    pub app_id: String,
}

impl SignedRequest {
    /// Headers the remote side needs to recompute and verify the signature
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(
            HeaderName::from_static("appid"),
            header_value(APP_ID_HEADER, &self.app_id)?,
        );
        headers.insert(
            HeaderName::from_static("timestamp"),
            HeaderValue::from(self.timestamp),
        );
        headers.insert(
            HeaderName::from_static("sign"),
            header_value(SIGN_HEADER, &self.signature)?,
        );
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| CcPaymentError::config(format!("Invalid {name} header value: {e}")))
}

/// Serialize a body into its canonical string form.
///
/// The body goes through `serde_json::Value` first, so object keys come out
/// sorted and equal bodies always produce the same string.
pub fn serialize_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<String> {
    match body {
        Some(body) => {
            let value = serde_json::to_value(body)?;
            Ok(serde_json::to_string(&value)?)
        }
        None => Ok(String::new()),
    }
}

/// Turns a path and optional body into a [`SignedRequest`]
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ClientConfig,
    credentials: CredentialStore,
}

impl RequestBuilder {
    pub fn new(config: ClientConfig, credentials: CredentialStore) -> Self {
        Self {
            config,
            credentials,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Build a signed request using the configured timestamp threshold
    pub fn build<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<SignedRequest> {
        self.build_with_threshold(path, body, self.config.timestamp_threshold)
    }

    /// Build a signed request with an explicit timestamp threshold
    pub fn build_with_threshold<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        threshold: i64,
    ) -> Result<SignedRequest> {
        let body = serialize_body(body)?;
        self.build_at(path, body, signer::timestamp(threshold)?)
    }

    /// Sign an already serialized body at a fixed timestamp.
    ///
    /// Fails with a config error when the credentials cannot be carried in
    /// request headers, so nothing is dispatched that the transport would
    /// have to reject.
    pub fn build_at(&self, path: &str, body: String, timestamp: i64) -> Result<SignedRequest> {
        let credentials = self.credentials.credentials()?;

        let message = signer::canonical_message(
            &credentials.app_id,
            &credentials.app_secret,
            timestamp,
            &body,
        );
        let signature = signer::sign(&message);

        debug!(path, timestamp, body_len = body.len(), "built signed request");

        let request = SignedRequest {
            url: self.config.endpoint(path),
            path: path.to_string(),
            body,
            timestamp,
            signature,
            app_id: credentials.app_id,
        };
        request.headers()?;
        Ok(request)
    }
}
