//! Asynchronous dispatch of signed requests

use crate::request::SignedRequest;
use crate::router::{CallId, Continuation, ResponseRouter};
use crate::transport::Transport;
use crate::{CcPaymentError, Result};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Hands signed requests to the transport and routes their outcomes
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    router: Arc<ResponseRouter>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("transport", &"<transport>")
            .field("router", &self.router)
            .finish()
    }
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_router(transport, Arc::new(ResponseRouter::new()))
    }

    pub fn with_router(transport: Arc<dyn Transport>, router: Arc<ResponseRouter>) -> Self {
        Self { transport, router }
    }

    pub fn router(&self) -> &Arc<ResponseRouter> {
        &self.router
    }

    /// Send `request` in the background and return immediately.
    ///
    /// `continuation` is invoked exactly once, from the spawned task, with
    /// either the decoded response or the failure. Outside a tokio runtime
    /// this fails with a configuration error and nothing is registered.
    pub fn dispatch(&self, request: SignedRequest, continuation: Continuation) -> Result<CallId> {
        let handle = Handle::try_current().map_err(|e| {
            CcPaymentError::config(format!("dispatch requires a tokio runtime: {e}"))
        })?;

        let continuation_name = continuation.name().to_string();
        let call_id = self.router.register(continuation);
        info!(
            %call_id,
            path = %request.path,
            continuation = %continuation_name,
            "dispatching request"
        );

        let transport = self.transport.clone();
        let router = self.router.clone();
        let delivery = handle.spawn(async move {
            match transport.post(&request).await {
                Ok(payload) => router.on_success(call_id, &payload),
                Err(failure) => router.on_error(call_id, failure.status, &failure.payload),
            }
        });

        let router = self.router.clone();
        handle.spawn(async move {
            let routed = match delivery.await {
                Ok(routed) => routed,
                // A panicking transport still owes the caller an outcome.
                Err(e) => router.on_error(call_id, None, &format!("delivery task failed: {e}")),
            };

            if let Err(e) = routed {
                warn!(%call_id, error = %e, "response could not be routed");
            }
        });

        Ok(call_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportFailure;
    use async_trait::async_trait;

    struct FixedTransport(std::result::Result<String, TransportFailure>);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn post(
            &self,
            _request: &SignedRequest,
        ) -> std::result::Result<String, TransportFailure> {
            self.0.clone()
        }
    }

    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        async fn post(
            &self,
            _request: &SignedRequest,
        ) -> std::result::Result<String, TransportFailure> {
            panic!("transport blew up")
        }
    }

    /// Collects formatted log output for assertions
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn request() -> SignedRequest {
        SignedRequest {
            url: "http://localhost/coin/all".to_string(),
            path: "coin/all".to_string(),
            body: String::new(),
            timestamp: 1_700_000_000,
            signature: "sig".to_string(),
            app_id: "app-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_success() {
        let dispatcher = Dispatcher::new(Arc::new(FixedTransport(Ok(
            r#"{"code":10000,"data":[]}"#.to_string()
        ))));
        let (continuation, rx) = Continuation::channel("onCoins");

        let call_id = dispatcher.dispatch(request(), continuation).unwrap();
        let response = rx.await.unwrap().unwrap();

        assert!(response.is_success());
        assert!(!dispatcher.router().is_pending(&call_id));
    }

    #[tokio::test]
    async fn test_dispatch_routes_failure() {
        let dispatcher = Dispatcher::new(Arc::new(FixedTransport(Err(TransportFailure::new(
            Some(401),
            "invalid sign",
        )))));
        let (continuation, rx) = Continuation::channel("onCoins");

        dispatcher.dispatch(request(), continuation).unwrap();
        let error = rx.await.unwrap().unwrap_err();

        assert!(error.is_transport());
        assert_eq!(dispatcher.router().pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_panicking_transport_still_resolves_call() {
        let dispatcher = Dispatcher::new(Arc::new(PanickingTransport));
        let (continuation, rx) = Continuation::channel("onCoins");

        dispatcher.dispatch(request(), continuation).unwrap();
        let error = rx.await.unwrap().unwrap_err();

        assert!(error.is_transport());
        assert_eq!(dispatcher.router().pending_calls(), 0);
    }

    #[test]
    fn test_dispatch_outside_runtime_is_a_config_error() {
        let dispatcher = Dispatcher::new(Arc::new(FixedTransport(Ok(
            r#"{"code":10000}"#.to_string()
        ))));
        let (continuation, _rx) = Continuation::channel("onCoins");

        let err = dispatcher.dispatch(request(), continuation).unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("tokio runtime"));
        assert_eq!(dispatcher.router().pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_log_names_the_continuation() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let dispatcher = Dispatcher::new(Arc::new(FixedTransport(Ok(
            r#"{"code":10000}"#.to_string()
        ))));
        let (continuation, rx) = Continuation::channel("onBalance");

        let call_id = tracing::subscriber::with_default(subscriber, || {
            dispatcher.dispatch(request(), continuation)
        })
        .unwrap();
        rx.await.unwrap().unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|line| line.contains("dispatching request"))
            .unwrap();
        assert!(line.contains("continuation=onBalance"));
        assert!(line.contains("path=coin/all"));
        assert!(line.contains(&call_id.to_string()));
    }
}
