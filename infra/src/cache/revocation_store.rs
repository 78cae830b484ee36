//! Redis-backed revocation oracle
//!
//! Revoked tokens are stored as marker keys holding no payload. Keys carry
//! a SHA-256 digest of the token so raw tokens never reach Redis.

use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use auth_core::{DomainError, RevocationOracle};

use super::RedisClient;
use crate::InfrastructureError;

const MARKER_VALUE: &str = "1";

/// Revocation oracle answering from Redis marker keys
#[derive(Debug, Clone)]
pub struct RedisRevocationOracle {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationOracle {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Mark a token as expired for `ttl`
    ///
    /// The marker should live at least as long as the token itself; a TTL
    /// below one second is rounded up.
    pub async fn mark_expired(&self, token: &str, ttl: Duration) -> Result<(), InfrastructureError> {
        let key = marker_key(&self.key_prefix, token);
        self.client
            .set_with_expiry(&key, MARKER_VALUE, ttl_seconds(ttl))
            .await?;

        info!("Token marked as expired");
        Ok(())
    }

    /// Remove a revocation marker, returning whether one existed
    pub async fn restore(&self, token: &str) -> Result<bool, InfrastructureError> {
        let key = marker_key(&self.key_prefix, token);
        let removed = self.client.delete(&key).await?;

        debug!("Revocation marker removed: {}", removed);
        Ok(removed)
    }
}

#[async_trait]
impl RevocationOracle for RedisRevocationOracle {
    async fn is_expired(&self, token: &str) -> Result<bool, DomainError> {
        let key = marker_key(&self.key_prefix, token);
        self.client
            .exists(&key)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("revocation lookup failed: {}", e),
            })
    }
}

pub(crate) fn marker_key(prefix: &str, token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{}:revoked:{}", prefix, hex::encode(digest))
}

pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    let rounded = if ttl.subsec_nanos() > 0 { secs + 1 } else { secs };
    rounded.max(1)
}
