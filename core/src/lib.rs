//! # Kpring Auth Core
//!
//! Token issuance and validation for the Kpring backend.
//! This crate contains the token entities, the signing codec, the
//! revocation oracle interface, the token service and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
