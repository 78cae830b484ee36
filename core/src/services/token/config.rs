//! Configuration for the token service

use std::time::Duration;

use auth_shared::AuthConfig;

/// Default upper bound for a single revocation lookup
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Configuration for the token service
///
/// Durations and the secret are required; there is no `Default`.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime in milliseconds
    pub access_duration_ms: u64,
    /// Refresh token lifetime in milliseconds
    pub refresh_duration_ms: u64,
    /// Raw key material the signing key is derived from
    pub secret_key: Vec<u8>,
    /// Upper bound for a single revocation oracle lookup
    pub oracle_timeout: Duration,
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_duration_ms", &self.access_duration_ms)
            .field("refresh_duration_ms", &self.refresh_duration_ms)
            .field("secret_key", &"<redacted>")
            .field("oracle_timeout", &self.oracle_timeout)
            .finish()
    }
}

impl TokenServiceConfig {
    /// Creates a configuration with the default oracle timeout
    pub fn new(
        access_duration_ms: u64,
        refresh_duration_ms: u64,
        secret_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            access_duration_ms,
            refresh_duration_ms,
            secret_key: secret_key.into(),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Sets the revocation lookup timeout
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::new(
            config.token.access_duration_ms,
            config.token.refresh_duration_ms,
            config.token.secret_key.as_bytes(),
        )
        .with_oracle_timeout(Duration::from_millis(config.revocation.lookup_timeout_ms))
    }
}
