//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Webook backend.
//! It provides concrete implementations of the interfaces declared in
//! `wb_core` and wires them into ready-to-use services.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client, Lua-scripted verification code store, JSON user
//!   cache, plus in-memory equivalents for development and tests
//! - **Database**: MySQL user DAO using SQLx
//! - **SMS**: SMS sender implementations
//! - **Security**: bcrypt password hashing

use std::sync::Arc;

use wb_core::errors::DomainError;
use wb_core::repositories::{CachedUserRepository, CodeCache, UserCache, UserRepository};
use wb_core::services::{
    CodeService, CodeServiceConfig, PasswordHasher, SmsSender, UserService,
};
use wb_shared::config::{AppConfig, CacheType};

/// Cache module - Redis client, code store and user cache
pub mod cache;

/// Configuration loading
pub mod config;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Security module - password hashing
pub mod security;

/// SMS service module
pub mod sms;

use cache::{MemoryCodeCache, MemoryUserCache, RedisClient, RedisCodeCache, RedisUserCache};
use database::{DatabasePool, MySqlUserDao};
use security::BcryptPasswordHasher;
use sms::MockSmsService;

pub use config::load_config;

/// Code service as wired by [`initialize`]
pub type AppCodeService = CodeService<dyn CodeCache, dyn SmsSender>;

/// User service as wired by [`initialize`]
pub type AppUserService = UserService<dyn UserRepository, dyn PasswordHasher>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    pub code_service: Arc<AppCodeService>,
    pub user_service: Arc<AppUserService>,
    /// Shared MySQL pool
    pub database: DatabasePool,
    /// Present when the Redis store is configured
    pub redis: Option<RedisClient>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The key-value stores (Redis, or in-memory when `cache.cache_type` is `memory`)
/// - The MySQL connection pool and user DAO
/// - The SMS sender and password hasher
/// - The code and user services on top of them
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let (code_cache, user_cache, redis) = match config.cache.cache_type {
        CacheType::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            (
                Arc::new(RedisCodeCache::new(client.clone(), &config.verification)) as Arc<dyn CodeCache>,
                Arc::new(RedisUserCache::new(client.clone(), &config.user_cache)) as Arc<dyn UserCache>,
                Some(client),
            )
        }
        CacheType::Memory => {
            tracing::warn!("Using in-memory stores; state is lost on restart and not shared between instances");
            (
                Arc::new(MemoryCodeCache::new(&config.verification)) as Arc<dyn CodeCache>,
                Arc::new(MemoryUserCache::new(&config.user_cache)) as Arc<dyn UserCache>,
                None,
            )
        }
    };

    let sms: Arc<dyn SmsSender> = match config.sms.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        other => {
            return Err(InfrastructureError::Config(format!(
                "Unsupported SMS provider: {}",
                other
            )))
        }
    };

    let database = DatabasePool::new(config.database.clone()).await?;
    let dao = Arc::new(MySqlUserDao::new(database.get_pool().clone()));

    let repository: Arc<dyn UserRepository> = Arc::new(CachedUserRepository::with_capacity(
        dao,
        user_cache,
        config.user_cache.repopulate_queue_capacity,
    ));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::default());

    let code_service = Arc::new(CodeService::new(
        code_cache,
        sms,
        CodeServiceConfig::from(&config.verification),
    ));
    let user_service = Arc::new(UserService::new(repository, hasher));

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        code_service,
        user_service,
        database,
        redis,
    })
}

/// Load configuration, install the tracing subscriber and initialize services
///
/// Entry point for binaries embedding the backend.
pub async fn bootstrap() -> Result<(AppConfig, InfrastructureServices), InfrastructureError> {
    let config = load_config()?;
    wb_shared::logging::init_tracing(&config.logging);

    let services = initialize(&config).await?;
    Ok((config, services))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration source error
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            InfrastructureError::Cache(e) => DomainError::Cache {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
