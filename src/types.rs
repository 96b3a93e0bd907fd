//! Core types for the CCPayment API

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response code the API reports for a successful call
pub const SUCCESS_CODE: i64 = 10000;

/// API paths used by the domain operations
pub mod paths {
    /// List all supported currencies
    pub const ALL_COINS: &str = "coin/all";
    /// Balance lookup for one coin
    pub const ASSETS: &str = "assets";
}

/// Decoded response envelope.
///
/// Fields other than `code`, `msg` and `data` are kept in `extra`, so the
/// payload reaches the continuation as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    /// API status code, when the payload carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Human-readable message, when the API sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Endpoint-specific payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ApiResponse {
    /// Decode a response from its wire form.
    ///
    /// An object is read as an envelope; any other JSON value becomes `data`.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(payload)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Ok(Self {
                data: other,
                ..Self::default()
            }),
        }
    }

    /// Whether the API reported success
    pub fn is_success(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    /// Decode `data` into a concrete type
    pub fn data_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.data)
    }
}

/// Body of a balance lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub coin_id: String,
}

impl BalanceQuery {
    pub fn new(coin_id: impl Into<String>) -> Self {
        Self {
            coin_id: coin_id.into(),
        }
    }
}

/// Balance of one coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    #[serde(rename = "coinId", alias = "coin_id")]
    pub coin_id: String,
    pub balance: Decimal,
}

/// A currency the API supports. Fields beyond the ID are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(rename = "coinId", alias = "coin_id")]
    pub coin_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
