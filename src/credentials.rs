//! Credential storage
//!
//! Credentials are kept in a [`PropertyStore`], the host's key/value storage,
//! under namespaced keys. Reads fail fast with a configuration error so that a
//! missing credential can never produce an unsigned or garbage-signed request.

use crate::{CcPaymentError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Prefix for every key this library writes to a property store
pub const KEY_PREFIX: &str = "ccpayment_";

/// Property key holding the app ID
pub const APP_ID_KEY: &str = "ccpayment_appid";
/// Property key holding the app secret
pub const APP_SECRET_KEY: &str = "ccpayment_appsecret";

/// Environment variable holding the app ID
pub const ENV_APP_ID: &str = "CCPAYMENT_APP_ID";
/// Environment variable holding the app secret
pub const ENV_APP_SECRET: &str = "CCPAYMENT_APP_SECRET";

const MISSING_APP_ID: &str = "Require app ID. Please setup first.";
const MISSING_APP_SECRET: &str = "Require app secret. Please setup first.";

/// Host-provided string key/value storage
pub trait PropertyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);
}

/// In-process property store
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    props: RwLock<HashMap<String, String>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get(&self, key: &str) -> Option<String> {
        let props = match self.props.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        props.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut props = match self.props.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        props.insert(key.to_string(), value);
    }
}

/// App ID and app secret pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Read credentials from `CCPAYMENT_APP_ID` and `CCPAYMENT_APP_SECRET`
    pub fn from_env() -> Result<Self> {
        use std::env;

        let app_id = env::var(ENV_APP_ID)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CcPaymentError::config(format!(
                    "{MISSING_APP_ID} Set the {ENV_APP_ID} environment variable."
                ))
            })?;

        let app_secret = env::var(ENV_APP_SECRET)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CcPaymentError::config(format!(
                    "{MISSING_APP_SECRET} Set the {ENV_APP_SECRET} environment variable."
                ))
            })?;

        Ok(Self { app_id, app_secret })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Set/get access to the app ID and app secret
#[derive(Clone)]
pub struct CredentialStore {
    props: Arc<dyn PropertyStore>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("props", &"<property store>")
            .finish()
    }
}

impl CredentialStore {
    /// Create a store backed by a fresh in-memory property store
    pub fn new() -> Self {
        Self::with_props(Arc::new(MemoryPropertyStore::new()))
    }

    /// Create a store backed by a host property store
    pub fn with_props(props: Arc<dyn PropertyStore>) -> Self {
        Self { props }
    }

    /// Create an in-memory store preloaded with `credentials`
    pub fn from_credentials(credentials: Credentials) -> Self {
        let store = Self::new();
        store.set_app_id(credentials.app_id);
        store.set_app_secret(credentials.app_secret);
        store
    }

    pub fn set_app_id(&self, app_id: impl Into<String>) {
        self.props.set(APP_ID_KEY, app_id.into());
    }

    pub fn set_app_secret(&self, app_secret: impl Into<String>) {
        self.props.set(APP_SECRET_KEY, app_secret.into());
    }

    /// Stored app ID; a config error when unset or empty
    pub fn app_id(&self) -> Result<String> {
        self.require(APP_ID_KEY, MISSING_APP_ID)
    }

    /// Stored app secret; a config error when unset or empty
    pub fn app_secret(&self) -> Result<String> {
        self.require(APP_SECRET_KEY, MISSING_APP_SECRET)
    }

    /// Both credentials, failing on the first one missing
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials {
            app_id: self.app_id()?,
            app_secret: self.app_secret()?,
        })
    }

    fn require(&self, key: &str, missing: &str) -> Result<String> {
        self.props
            .get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CcPaymentError::config(missing))
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
