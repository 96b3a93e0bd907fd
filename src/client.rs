//! CCPayment API client

use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, Credentials};
use crate::dispatcher::Dispatcher;
use crate::request::{RequestBuilder, SignedRequest};
use crate::router::{CallId, Continuation, ResponseRouter};
use crate::transport::{HttpTransport, Transport};
use crate::types::*;
use crate::{CcPaymentError, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Signed-request client for the CCPayment API.
///
/// Each client owns its configuration and credential store, so several
/// clients with different credentials can coexist.
#[derive(Debug, Clone)]
pub struct CcPaymentClient {
    builder: RequestBuilder,
    dispatcher: Dispatcher,
}

impl CcPaymentClient {
    /// Create a client against the default API URL with no credentials set
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration and the HTTP transport
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(
            config,
            CredentialStore::new(),
            Arc::new(transport),
        ))
    }

    /// Create a client from environment variables: config and credentials
    pub fn from_env() -> Result<Self> {
        let client = Self::with_config(ClientConfig::from_env()?)?;
        let credentials = Credentials::from_env()?;
        client.set_app_id(credentials.app_id);
        client.set_app_secret(credentials.app_secret);
        Ok(client)
    }

    /// Create a client from its parts
    pub fn with_transport(
        config: ClientConfig,
        credentials: CredentialStore,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            builder: RequestBuilder::new(config, credentials),
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Set credentials in one go
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        self.set_app_id(credentials.app_id);
        self.set_app_secret(credentials.app_secret);
        self
    }

    pub fn set_app_id(&self, app_id: impl Into<String>) {
        self.builder.credentials().set_app_id(app_id);
    }

    pub fn set_app_secret(&self, app_secret: impl Into<String>) {
        self.builder.credentials().set_app_secret(app_secret);
    }

    pub fn app_id(&self) -> Result<String> {
        self.builder.credentials().app_id()
    }

    pub fn app_secret(&self) -> Result<String> {
        self.builder.credentials().app_secret()
    }

    pub fn config(&self) -> &ClientConfig {
        self.builder.config()
    }

    pub fn router(&self) -> &Arc<ResponseRouter> {
        self.dispatcher.router()
    }

    /// Build a signed request without sending it
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<SignedRequest> {
        self.builder.build(path, body)
    }

    /// Sign and dispatch a call; `continuation` receives its outcome later.
    ///
    /// Configuration and serialization errors are returned here, before any
    /// network activity. Returning `Ok` says nothing about the call's outcome.
    pub fn dispatch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        continuation: Continuation,
    ) -> Result<CallId> {
        let request = self.builder.build(path, body)?;
        self.dispatcher.dispatch(request, continuation)
    }

    /// Sign, dispatch and wait for the outcome
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let (continuation, rx) = Continuation::channel(path);
        let call_id = self.dispatch(path, body, continuation)?;
        rx.await.map_err(|_| CcPaymentError::Cancelled { call_id })?
    }

    /// List supported currencies (`coin/all`)
    pub fn get_all_supported_currencies(&self, continuation: Continuation) -> Result<CallId> {
        self.dispatch::<Value>(paths::ALL_COINS, None, continuation)
    }

    /// Look up one coin's balance (`assets`).
    ///
    /// `body` must be an object whose `coin_id` is a non-empty string or a
    /// non-zero number; otherwise this fails with a validation error and
    /// nothing is sent.
    pub fn get_balance_by_id(
        &self,
        body: Option<&Value>,
        continuation: Continuation,
    ) -> Result<CallId> {
        let body = validate_balance_body(body)?;
        self.dispatch(paths::ASSETS, Some(body), continuation)
    }

    /// Awaitable form of [`Self::get_all_supported_currencies`]
    pub async fn supported_currencies(&self) -> Result<ApiResponse> {
        self.request::<Value>(paths::ALL_COINS, None).await
    }

    /// Awaitable balance lookup, decoding the balance on success
    pub async fn coin_balance(&self, coin_id: &str) -> Result<CoinBalance> {
        if coin_id.is_empty() {
            return Err(CcPaymentError::validation("getCoinBalance needs coin_id"));
        }

        let response = self
            .request(paths::ASSETS, Some(&BalanceQuery::new(coin_id)))
            .await?;

        if !response.is_success() {
            return Err(CcPaymentError::transport(
                None,
                serde_json::to_string(&response)?,
            ));
        }

        response
            .data_as::<CoinBalance>()
            .map_err(|e| CcPaymentError::decoding(e.to_string(), response.data.to_string()))
    }
}

fn validate_balance_body(body: Option<&Value>) -> Result<&Value> {
    let body = body.ok_or_else(|| CcPaymentError::validation("getCoinBalance needs body"))?;

    // Zero is not a coin ID; neither are booleans, arrays or objects.
    match body.get("coin_id") {
        Some(Value::String(coin_id)) if !coin_id.is_empty() => Ok(body),
        Some(Value::Number(coin_id)) if coin_id.as_f64() != Some(0.0) => Ok(body),
        _ => Err(CcPaymentError::validation("getCoinBalance needs coin_id")),
    }
}
