//! Revocation oracle trait consulted on every token validation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Authority answering whether a token is still live
///
/// The token service only reads from the oracle. Marking tokens as expired
/// (logout, forced invalidation, centrally tracked expiry) is done by a
/// separate process against the same store.
///
/// # Contract
/// - Callable concurrently; lookups are idempotent and side-effect free.
/// - A token the oracle has never seen is not expired (`Ok(false)`).
/// - Transport or storage failures are returned as `Err`, never as `Ok(false)`,
///   so an unreachable store cannot let a revoked token through.
#[async_trait]
pub trait RevocationOracle: Send + Sync {
    /// Check whether the given signed token has been marked expired
    ///
    /// # Arguments
    /// * `token` - The signed token string exactly as presented by the client
    ///
    /// # Returns
    /// * `Ok(true)` - Token is revoked or expired
    /// * `Ok(false)` - No revocation record exists
    /// * `Err(DomainError)` - The lookup could not be completed
    async fn is_expired(&self, token: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<O: RevocationOracle + ?Sized> RevocationOracle for Arc<O> {
    async fn is_expired(&self, token: &str) -> Result<bool, DomainError> {
        (**self).is_expired(token).await
    }
}
