//! Token service module
//!
//! This module handles all token-related operations:
//! - Signing and verification of token strings (`codec`)
//! - Issuance of access/refresh pairs
//! - Validation against the revocation oracle
//! - Renewal of access tokens from refresh tokens

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::{CodecError, SigningKey, TokenCodec, MIN_SECRET_KEY_BYTES};
pub use config::{TokenServiceConfig, DEFAULT_ORACLE_TIMEOUT};
pub use service::TokenService;
