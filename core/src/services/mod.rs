//! Business services containing domain logic and use cases.

pub mod token;

pub use token::{TokenCodec, TokenService, TokenServiceConfig};
