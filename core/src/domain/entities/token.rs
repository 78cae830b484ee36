//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// JWT issuer
pub const TOKEN_ISSUER: &str = "kpring-auth";

/// Kind of a token, fixed when the token is minted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Short-lived credential presented on every request
    Access,
    /// Long-lived credential used only to obtain new access tokens
    Refresh,
}

impl TokenKind {
    /// Wire representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "ACCESS",
            TokenKind::Refresh => "REFRESH",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in a signed token
///
/// Immutable once built. Timestamps have whole-second resolution because
/// that is what the JWT `iat`/`exp` claims carry, so claims survive an
/// encode/decode round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    token_id: Uuid,
    subject_id: String,
    display_name: String,
    kind: TokenKind,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Creates claims for a token issued now
    ///
    /// # Arguments
    ///
    /// * `subject_id` - Identifier of the authenticated principal
    /// * `display_name` - Name shown for the principal
    /// * `kind` - Access or refresh
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - Claims with a fresh token id
    /// * `Err(DomainError::Validation)` - The lifetime is shorter than one second
    pub fn issue(
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        kind: TokenKind,
        lifetime: Duration,
    ) -> DomainResult<Self> {
        let issued_at = Utc::now().trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| DomainError::Validation {
                message: format!("token lifetime {} is out of range", lifetime),
            })?;

        Self::new(
            Uuid::new_v4(),
            subject_id,
            display_name,
            kind,
            issued_at,
            expires_at,
        )
    }

    /// Creates claims from explicit parts
    ///
    /// Sub-second precision is dropped from both timestamps.
    pub fn new(
        token_id: Uuid,
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let issued_at = issued_at.trunc_subsecs(0);
        let expires_at = expires_at.trunc_subsecs(0);

        if expires_at <= issued_at {
            return Err(DomainError::Validation {
                message: format!(
                    "token must expire after it is issued (issued_at: {}, expires_at: {})",
                    issued_at, expires_at
                ),
            });
        }

        Ok(Self {
            token_id,
            subject_id: subject_id.into(),
            display_name: display_name.into(),
            kind,
            issued_at,
            expires_at,
        })
    }

    /// Rebuilds claims read back from a verified token
    ///
    /// Skips the issuance-window check: a signed token whose `exp` is not
    /// after its `iat` is still ours, and whether it is live is up to the
    /// revocation oracle.
    pub(crate) fn from_verified(
        token_id: Uuid,
        subject_id: String,
        display_name: String,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            subject_id,
            display_name,
            kind,
            issued_at: issued_at.trunc_subsecs(0),
            expires_at: expires_at.trunc_subsecs(0),
        }
    }

    /// Unique identifier of this token (JWT `jti`)
    pub fn token_id(&self) -> Uuid {
        self.token_id
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the embedded expiry has passed at `now`
    ///
    /// Informational only. Token validation never rejects on this; liveness
    /// is decided by the revocation oracle.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// When the access token expires, for client-side renewal scheduling
    pub access_expire_at: DateTime<Utc>,

    /// Signed refresh token
    pub refresh_token: String,

    /// When the refresh token expires
    pub refresh_expire_at: DateTime<Utc>,
}
