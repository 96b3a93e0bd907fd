//! # ccpayment - signed-request client for the CCPayment API
//!
//! Every outbound call is signed with
//! `SHA256_hex(app_id + app_secret + timestamp + body)` and sent with the
//! `Appid`, `Timestamp` and `Sign` headers. Calls are dispatched in the
//! background; each one carries its own [`router::Continuation`], which is
//! invoked exactly once with either the decoded response or the failure.
//!
//! ```no_run
//! use ccpayment::{CcPaymentClient, Continuation, Credentials};
//!
//! # async fn run() -> ccpayment::Result<()> {
//! let client = CcPaymentClient::new()?
//!     .with_credentials(Credentials::new("app-id", "app-secret"));
//!
//! // Awaitable form
//! let balance = client.coin_balance("1280").await?;
//! println!("{} {}", balance.coin_id, balance.balance);
//!
//! // Continuation form
//! client.get_all_supported_currencies(Continuation::new("onCoins", |outcome| {
//!     match outcome {
//!         Ok(response) => println!("{}", response.data),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }))?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod request;
pub mod router;
pub mod signer;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::CcPaymentClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use credentials::{CredentialStore, Credentials, MemoryPropertyStore, PropertyStore};
pub use error::{CcPaymentError, Result};
pub use request::SignedRequest;
pub use router::{CallId, Continuation, Outcome, ResponseRouter};
pub use transport::{HttpTransport, Transport, TransportFailure};
pub use types::*;

/// Current version of the ccpayment library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(SUCCESS_CODE, 10000);
        assert_eq!(paths::ALL_COINS, "coin/all");
        assert_eq!(paths::ASSETS, "assets");
    }
}
