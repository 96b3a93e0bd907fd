//! Request signing
//!
//! `Sign = hex(SHA256(app_id + app_secret + timestamp + body))`, with no
//! separators. The remote verifier recomputes the same digest, so the field
//! order and byte representation must not change.

use crate::{CcPaymentError, Result};
use sha2::{Digest, Sha256};

/// Build the canonical message that is signed for a request
pub fn canonical_message(app_id: &str, app_secret: &str, timestamp: i64, body: &str) -> String {
    let timestamp = timestamp.to_string();
    let mut message =
        String::with_capacity(app_id.len() + app_secret.len() + timestamp.len() + body.len());
    message.push_str(app_id);
    message.push_str(app_secret);
    message.push_str(&timestamp);
    message.push_str(body);
    message
}

/// SHA-256 digest of `message` as lowercase hex
pub fn sign(message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hex::encode(hasher.finalize())
}

/// Current unix time in whole seconds, shifted by `threshold` seconds.
///
/// There is no client-side freshness or replay check; the server decides
/// which timestamps it accepts. A threshold that pushes the timestamp out of
/// the `i64` range is a config error.
pub fn timestamp(threshold: i64) -> Result<i64> {
    chrono::Utc::now()
        .timestamp()
        .checked_add(threshold)
        .ok_or_else(|| {
            CcPaymentError::config(format!("Timestamp threshold {threshold} is out of range"))
        })
}
