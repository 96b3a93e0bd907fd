//! Error types for the ccpayment library

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for ccpayment operations
pub type Result<T> = std::result::Result<T, CcPaymentError>;

/// Main error type for ccpayment operations
#[derive(Error, Debug)]
pub enum CcPaymentError {
    /// A credential or client setting is missing or unusable
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A domain operation was called without a required field
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The transport failed or the remote service rejected the call.
    /// `payload` is the raw error body, unclassified.
    #[error("Transport error: {payload}")]
    Transport {
        status: Option<u16>,
        payload: String,
    },

    /// A success payload could not be decoded
    #[error("Decoding error: {message}")]
    Decoding { message: String, payload: String },

    /// Request body serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An outcome arrived for a call that is not pending
    #[error("Unknown call: {call_id}")]
    UnknownCall { call_id: Uuid },

    /// The awaiting side of a call went away before its outcome was routed
    #[error("Call cancelled: {call_id}")]
    Cancelled { call_id: Uuid },
}

impl CcPaymentError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error from a raw payload
    pub fn transport(status: Option<u16>, payload: impl Into<String>) -> Self {
        Self::Transport {
            status,
            payload: payload.into(),
        }
    }

    /// Create a decoding error, keeping the payload that failed to decode
    pub fn decoding(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
            payload: payload.into(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding { .. })
    }
}
