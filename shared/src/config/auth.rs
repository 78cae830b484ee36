//! Token issuance and revocation configuration

use serde::{Deserialize, Serialize};

/// Token issuance settings
///
/// Every field is required: a deployment without an explicit signing
/// secret or explicit lifetimes fails to load instead of falling back
/// to a development value.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenSettings {
    /// Access token lifetime in milliseconds
    pub access_duration_ms: u64,

    /// Refresh token lifetime in milliseconds
    pub refresh_duration_ms: u64,

    /// Raw secret the signing key is derived from
    pub secret_key: String,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("access_duration_ms", &self.access_duration_ms)
            .field("refresh_duration_ms", &self.refresh_duration_ms)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl TokenSettings {
    /// Create token settings
    pub fn new(
        access_duration_ms: u64,
        refresh_duration_ms: u64,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            access_duration_ms,
            refresh_duration_ms,
            secret_key: secret_key.into(),
        }
    }
}

/// Where revocation markers are looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Shared Redis instance, required when more than one process validates tokens
    Redis,
    /// Process-local set, for development and single-instance deployments
    Memory,
}

/// Revocation oracle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Backend used to answer revocation lookups
    #[serde(default = "default_backend")]
    pub backend: RevocationBackend,

    /// Upper bound for a single revocation lookup in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Key prefix for revocation markers in Redis
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token issuance settings
    pub token: TokenSettings,

    /// Revocation lookup settings
    #[serde(default)]
    pub revocation: RevocationConfig,
}

fn default_backend() -> RevocationBackend {
    RevocationBackend::Redis
}

fn default_lookup_timeout_ms() -> u64 {
    500
}

fn default_key_prefix() -> String {
    String::from("auth")
}
