//! Domain layer containing token entities.

pub mod entities;

pub use entities::{TokenClaims, TokenKind, TokenPair, TOKEN_ISSUER};
