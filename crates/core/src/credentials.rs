//! Access credentials
//!
//! Credentials are resolved once at startup, from the command line or the
//! environment first and from the configuration file second, and are then
//! passed explicitly to the store provider.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable holding the access key id
pub const ACCESS_KEY_ENV: &str = "SPACES_ACCESS_KEY_ID";

/// Environment variable holding the secret access key
pub const SECRET_KEY_ENV: &str = "SPACES_SECRET_ACCESS_KEY";

/// Access key pair for the storage service
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Access key ID
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,
}

impl Credentials {
    /// Create credentials from an access key pair
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Resolve credentials, preferring explicit values over `fallback`
    ///
    /// Each half of the key pair is resolved independently. Empty strings
    /// count as unset.
    pub fn resolve(
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        fallback: Option<&Credentials>,
    ) -> Result<Self> {
        let access_key_id = non_empty(access_key_id)
            .or_else(|| fallback.and_then(|c| non_empty(Some(c.access_key_id.clone()))))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Missing access key id. Set {ACCESS_KEY_ENV} or add [credentials] to the config file"
                ))
            })?;

        let secret_access_key = non_empty(secret_access_key)
            .or_else(|| fallback.and_then(|c| non_empty(Some(c.secret_access_key.clone()))))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Missing secret access key. Set {SECRET_KEY_ENV} or add [credentials] to the config file"
                ))
            })?;

        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
