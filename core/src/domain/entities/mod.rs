//! Domain entities representing core business objects.

pub mod token;

pub use token::{TokenClaims, TokenKind, TokenPair, TOKEN_ISSUER};
