//! Token error taxonomy
//!
//! Callers map each kind to a response; the kind is never a reason to
//! skip a check. Codes are stable and safe to expose to clients.

use thiserror::Error;

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch or a token that cannot be parsed
    #[error("Token is not valid")]
    TokenNotValid,

    /// The revocation oracle reports the token as no longer live
    #[error("Token has expired")]
    TokenExpired,

    /// The API was called with the wrong kind of token or argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The revocation oracle could not be reached or timed out
    #[error("Revocation check failed: {message}")]
    RevocationCheckFailed { message: String },
}

impl TokenError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenNotValid => "AUTH_0001",
            TokenError::TokenExpired => "AUTH_0002",
            TokenError::InvalidArgument { .. } => "AUTH_0003",
            TokenError::RevocationCheckFailed { .. } => "AUTH_0004",
        }
    }

    /// True for failures that mean "the presented credential is not acceptable".
    ///
    /// Usage errors and infrastructure failures are not authentication
    /// failures and should be logged and counted separately.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, TokenError::TokenNotValid | TokenError::TokenExpired)
    }
}
