//! Signing and verification of token strings
//!
//! Tokens are compact HS256 JWS strings. The codec checks structure and
//! signature only; it never rejects a token because its `exp` has passed.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::token::{TokenClaims, TokenKind, TOKEN_ISSUER};
use crate::errors::{DomainError, DomainResult};

/// Minimum secret length in bytes for HMAC-SHA256 (256 bits)
pub const MIN_SECRET_KEY_BYTES: usize = 32;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Codec failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The string is not a token of the expected structure
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// The signature does not match the claims under the given key
    #[error("Token signature mismatch")]
    SignatureMismatch,

    /// The claims could not be serialized
    #[error("Token encoding failed: {0}")]
    Encode(String),
}

/// HMAC key pair derived once from the configured secret
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Derives the signing key from raw secret material
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKey)` - Key ready for signing and verification
    /// * `Err(DomainError::Validation)` - Secret is empty or shorter than 256 bits
    pub fn derive(secret: &[u8]) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "secret key must not be empty".to_string(),
            });
        }
        if secret.len() < MIN_SECRET_KEY_BYTES {
            return Err(DomainError::Validation {
                message: format!(
                    "secret key must be at least {} bytes, got {}",
                    MIN_SECRET_KEY_BYTES,
                    secret.len()
                ),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }
}

/// JWT payload as it appears on the wire
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    nickname: String,
    #[serde(rename = "type")]
    kind: TokenKind,
    iat: i64,
    exp: i64,
    jti: Uuid,
    iss: String,
}

/// Stateless token encoder/decoder
pub struct TokenCodec;

impl TokenCodec {
    /// Serializes and signs claims
    pub fn encode(claims: &TokenClaims, key: &SigningKey) -> Result<String, CodecError> {
        let payload = JwtClaims {
            sub: claims.subject_id().to_string(),
            nickname: claims.display_name().to_string(),
            kind: claims.kind(),
            iat: claims.issued_at().timestamp(),
            exp: claims.expires_at().timestamp(),
            jti: claims.token_id(),
            iss: TOKEN_ISSUER.to_string(),
        };

        encode(&Header::new(ALGORITHM), &payload, &key.encoding_key)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Verifies the signature and parses the claims
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - Signature valid, claims well formed (expired or not,
    ///   even with `exp` not after `iat`)
    /// * `Err(CodecError::SignatureMismatch)` - Signed with another key or tampered
    /// * `Err(CodecError::Malformed)` - Not a token of the expected structure
    pub fn decode(token: &str, key: &SigningKey) -> Result<TokenClaims, CodecError> {
        let data = decode::<JwtClaims>(token, &key.decoding_key, &validation()).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => CodecError::SignatureMismatch,
                _ => CodecError::Malformed(e.to_string()),
            }
        })?;
        let claims = data.claims;

        Ok(TokenClaims::from_verified(
            claims.jti,
            claims.sub,
            claims.nickname,
            claims.kind,
            timestamp(claims.iat, "iat")?,
            timestamp(claims.exp, "exp")?,
        ))
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.set_issuer(&[TOKEN_ISSUER]);
    // Expiry is enforced by the revocation oracle, not here.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation
}

fn timestamp(seconds: i64, claim: &str) -> Result<DateTime<Utc>, CodecError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| CodecError::Malformed(format!("invalid {} timestamp", claim)))
}
