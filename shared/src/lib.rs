//! Shared configuration types for the Kpring auth services
//!
//! This crate provides the configuration consumed by every layer:
//! - Token issuance settings (durations, signing secret)
//! - Revocation store and Redis settings
//! - Environment detection and logging settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, Environment, LogFormat, LoggingConfig,
    RevocationBackend, RevocationConfig, TokenSettings,
};
