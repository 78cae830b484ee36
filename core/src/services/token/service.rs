//! Main token service implementation

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::token::{TokenClaims, TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RevocationOracle;

use super::codec::{CodecError, SigningKey, TokenCodec};
use super::config::TokenServiceConfig;

/// Claims carry whole seconds, so shorter lifetimes cannot be represented
const MIN_DURATION_MS: u64 = 1000;

/// Service issuing, validating and renewing signed tokens
///
/// Immutable after construction and safe to share across tasks. The only
/// suspension point of any operation is the revocation oracle lookup.
pub struct TokenService<O: RevocationOracle> {
    oracle: O,
    key: SigningKey,
    access_duration: Duration,
    refresh_duration: Duration,
    oracle_timeout: std::time::Duration,
}

impl<O: RevocationOracle> TokenService<O> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `oracle` - Revocation oracle consulted on every validation
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a validation error if the secret is missing
    /// or too short, a duration is below one second, or the timeout is zero
    pub fn new(oracle: O, config: TokenServiceConfig) -> DomainResult<Self> {
        let key = SigningKey::derive(&config.secret_key)?;
        let access_duration = lifetime("access", config.access_duration_ms)?;
        let refresh_duration = lifetime("refresh", config.refresh_duration_ms)?;

        if config.oracle_timeout.is_zero() {
            return Err(DomainError::Validation {
                message: "oracle timeout must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            oracle,
            key,
            access_duration,
            refresh_duration,
            oracle_timeout: config.oracle_timeout,
        })
    }

    /// Issues an access/refresh token pair for an authenticated principal
    ///
    /// Nothing is recorded server side.
    pub fn create_token(&self, subject_id: &str, display_name: &str) -> DomainResult<TokenPair> {
        let access =
            TokenClaims::issue(subject_id, display_name, TokenKind::Access, self.access_duration)?;
        let refresh =
            TokenClaims::issue(subject_id, display_name, TokenKind::Refresh, self.refresh_duration)?;

        let pair = TokenPair {
            access_token: self.sign(&access)?,
            access_expire_at: access.expires_at(),
            refresh_token: self.sign(&refresh)?,
            refresh_expire_at: refresh.expires_at(),
        };

        debug!(
            subject_id = %subject_id,
            access_token_id = %access.token_id(),
            refresh_token_id = %refresh.token_id(),
            "Issued token pair"
        );
        Ok(pair)
    }

    /// Validates a presented token
    ///
    /// Checked in this order:
    /// 1. Signature and structure, else `TokenNotValid`
    /// 2. Revocation oracle, `TokenExpired` if it reports the token expired,
    ///    whatever the embedded expiry says
    ///
    /// The embedded `exp` is never used for rejection.
    pub async fn check_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let claims = self.decode(token)?;
        self.ensure_live(token, &claims).await?;
        Ok(claims)
    }

    /// Issues a new access token from a refresh token
    ///
    /// The refresh token is neither rotated nor consumed: the returned pair
    /// echoes it with its original expiry.
    ///
    /// # Errors
    ///
    /// * `TokenNotValid` - Bad signature or structure
    /// * `InvalidArgument` - The token is not a refresh token
    /// * `TokenExpired` - The oracle reports the refresh token expired
    /// * `RevocationCheckFailed` - The oracle could not answer in time
    pub async fn re_create_access_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let refresh = self.decode(refresh_token)?;

        if refresh.kind() != TokenKind::Refresh {
            warn!(
                subject_id = %refresh.subject_id(),
                kind = %refresh.kind(),
                "Token renewal called with a non-refresh token"
            );
            return Err(TokenError::InvalidArgument {
                message: format!("expected a REFRESH token, got {}", refresh.kind()),
            }
            .into());
        }

        self.ensure_live(refresh_token, &refresh).await?;

        let access = TokenClaims::issue(
            refresh.subject_id(),
            refresh.display_name(),
            TokenKind::Access,
            self.access_duration,
        )?;

        let pair = TokenPair {
            access_token: self.sign(&access)?,
            access_expire_at: access.expires_at(),
            refresh_token: refresh_token.to_string(),
            refresh_expire_at: refresh.expires_at(),
        };

        debug!(
            subject_id = %refresh.subject_id(),
            access_token_id = %access.token_id(),
            "Renewed access token"
        );
        Ok(pair)
    }

    fn sign(&self, claims: &TokenClaims) -> DomainResult<String> {
        TokenCodec::encode(claims, &self.key).map_err(|e| DomainError::Internal {
            message: e.to_string(),
        })
    }

    fn decode(&self, token: &str) -> DomainResult<TokenClaims> {
        TokenCodec::decode(token, &self.key).map_err(|e| {
            match &e {
                CodecError::SignatureMismatch => warn!("Rejected token with invalid signature"),
                _ => warn!(error = %e, "Rejected malformed token"),
            }
            DomainError::Token(TokenError::TokenNotValid)
        })
    }

    /// Consults the oracle; a timeout or transport failure is never read as "live"
    async fn ensure_live(&self, token: &str, claims: &TokenClaims) -> DomainResult<()> {
        let lookup = tokio::time::timeout(self.oracle_timeout, self.oracle.is_expired(token)).await;

        match lookup {
            Ok(Ok(false)) => Ok(()),
            Ok(Ok(true)) => {
                info!(
                    subject_id = %claims.subject_id(),
                    token_id = %claims.token_id(),
                    kind = %claims.kind(),
                    "Token reported expired by revocation oracle"
                );
                Err(TokenError::TokenExpired.into())
            }
            Ok(Err(e)) => {
                warn!(
                    subject_id = %claims.subject_id(),
                    error = %e,
                    "Revocation lookup failed"
                );
                Err(TokenError::RevocationCheckFailed {
                    message: e.to_string(),
                }
                .into())
            }
            Err(_) => {
                warn!(
                    subject_id = %claims.subject_id(),
                    timeout_ms = %self.oracle_timeout.as_millis(),
                    "Revocation lookup timed out"
                );
                Err(TokenError::RevocationCheckFailed {
                    message: format!(
                        "revocation lookup timed out after {}ms",
                        self.oracle_timeout.as_millis()
                    ),
                }
                .into())
            }
        }
    }
}

fn lifetime(name: &str, millis: u64) -> DomainResult<Duration> {
    if millis < MIN_DURATION_MS {
        return Err(DomainError::Validation {
            message: format!(
                "{} duration must be at least {}ms, got {}ms",
                name, MIN_DURATION_MS, millis
            ),
        });
    }

    // Expiry must stay representable, or every later issuance would fail
    i64::try_from(millis)
        .ok()
        .and_then(Duration::try_milliseconds)
        .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
        .ok_or_else(|| DomainError::Validation {
            message: format!("{} duration of {}ms is out of range", name, millis),
        })
}
