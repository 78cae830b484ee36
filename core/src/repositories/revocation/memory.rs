//! Process-local revocation oracle

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::r#trait::RevocationOracle;

/// Upper bound on a marker's lifetime, for TTLs too large to add to `Instant::now()`
const MAX_MARKER_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Revocation oracle backed by an in-memory map of expired tokens
///
/// Each marker carries a deadline after which the token counts as live
/// again, so markers only need to outlive the token they revoke. Clones
/// share the same map, so a handle kept by the logout path sees the same
/// state as the one given to the token service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationOracle {
    pub(super) expired: Arc<RwLock<HashMap<String, Instant>>>,
}

impl InMemoryRevocationOracle {
    /// Create an empty oracle
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token as expired for `ttl`
    ///
    /// Stale markers are pruned on every call. Marking a token again keeps
    /// the later deadline. Returns `false` if the token was already marked.
    pub async fn mark_expired(&self, token: &str, ttl: Duration) -> bool {
        let now = Instant::now();
        let deadline = now
            .checked_add(ttl.min(MAX_MARKER_TTL))
            .unwrap_or(now);

        let mut expired = self.expired.write().await;
        expired.retain(|_, until| *until > now);

        match expired.get_mut(token) {
            Some(until) => {
                *until = (*until).max(deadline);
                false
            }
            None => {
                expired.insert(token.to_string(), deadline);
                true
            }
        }
    }

    /// Remove the expiry marker of a token
    ///
    /// Returns `false` if the token was not marked or its marker had lapsed.
    pub async fn restore(&self, token: &str) -> bool {
        let now = Instant::now();
        self.expired
            .write()
            .await
            .remove(token)
            .map_or(false, |until| until > now)
    }

    /// Number of tokens currently marked expired
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.expired
            .read()
            .await
            .values()
            .filter(|until| **until > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RevocationOracle for InMemoryRevocationOracle {
    async fn is_expired(&self, token: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        Ok(self
            .expired
            .read()
            .await
            .get(token)
            .map_or(false, |until| *until > now))
    }
}
