//! # Infrastructure Layer
//!
//! Concrete adapters for the Kpring auth service: the Redis-backed
//! revocation store, tracing setup, and wiring of the token service
//! from application configuration.
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis revocation backend (default)

use std::sync::Arc;
use std::time::Duration;

use auth_core::{
    DomainError, InMemoryRevocationOracle, RevocationOracle, TokenService, TokenServiceConfig,
};
use auth_shared::{AppConfig, RevocationBackend};

/// Cache module - Redis client and revocation store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Tracing subscriber initialization
pub mod telemetry;


pub use telemetry::init_tracing;

/// Token service over whichever revocation backend was configured
pub type ConfiguredTokenService = TokenService<Arc<dyn RevocationOracle>>;

/// Write side of the configured revocation backend
///
/// The token service only reads revocation state; logout and
/// administrative flows use this handle to change it.
#[derive(Debug, Clone)]
pub enum RevocationStore {
    Memory(InMemoryRevocationOracle),
    #[cfg(feature = "redis-cache")]
    Redis(cache::RedisRevocationOracle),
}

impl RevocationStore {
    /// Mark a token as expired
    ///
    /// The marker lapses after `ttl`, which should cover the token's
    /// remaining lifetime.
    pub async fn mark_expired(&self, token: &str, ttl: Duration) -> Result<(), InfrastructureError> {
        match self {
            Self::Memory(oracle) => {
                oracle.mark_expired(token, ttl).await;
                Ok(())
            }
            #[cfg(feature = "redis-cache")]
            Self::Redis(oracle) => oracle.mark_expired(token, ttl).await,
        }
    }

    /// Remove a revocation marker, returning whether one existed
    pub async fn restore(&self, token: &str) -> Result<bool, InfrastructureError> {
        match self {
            Self::Memory(oracle) => Ok(oracle.restore(token).await),
            #[cfg(feature = "redis-cache")]
            Self::Redis(oracle) => oracle.restore(token).await,
        }
    }

    fn oracle(&self) -> Arc<dyn RevocationOracle> {
        match self {
            Self::Memory(oracle) => Arc::new(oracle.clone()),
            #[cfg(feature = "redis-cache")]
            Self::Redis(oracle) => Arc::new(oracle.clone()),
        }
    }
}

/// Infrastructure service container
#[derive(Clone)]
pub struct AuthServices {
    pub token_service: Arc<ConfiguredTokenService>,
    pub revocation: RevocationStore,
}

/// Build the auth services from configuration
///
/// Connects to Redis when that backend is selected, then constructs the
/// token service, failing fast on invalid token settings.
pub async fn initialize(config: &AppConfig) -> Result<AuthServices, InfrastructureError> {
    tracing::info!(
        "Initializing auth services (environment: {}, revocation backend: {:?})",
        config.environment,
        config.auth.revocation.backend
    );

    let revocation = revocation_store(config).await?;
    let token_service = TokenService::new(
        revocation.oracle(),
        TokenServiceConfig::from(&config.auth),
    )?;

    tracing::info!("Auth services initialized successfully");

    Ok(AuthServices {
        token_service: Arc::new(token_service),
        revocation,
    })
}

async fn revocation_store(config: &AppConfig) -> Result<RevocationStore, InfrastructureError> {
    match config.auth.revocation.backend {
        RevocationBackend::Memory => {
            if config.environment.is_production() {
                tracing::warn!("In-memory revocation store is not shared between instances");
            }
            Ok(RevocationStore::Memory(InMemoryRevocationOracle::new()))
        }
        #[cfg(feature = "redis-cache")]
        RevocationBackend::Redis => {
            let client = cache::RedisClient::new(config.cache.clone()).await?;
            Ok(RevocationStore::Redis(cache::RedisRevocationOracle::new(
                client,
                config.auth.revocation.key_prefix.clone(),
            )))
        }
        #[cfg(not(feature = "redis-cache"))]
        RevocationBackend::Redis => Err(InfrastructureError::Config(
            "Redis revocation backend requires the `redis-cache` feature".to_string(),
        )),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain error raised while constructing services
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
