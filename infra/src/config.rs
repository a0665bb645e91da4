//! Configuration loading for infrastructure services
//!
//! Sources, lowest precedence first:
//! - Built-in defaults for the detected environment
//! - The environment's `.env` file (e.g. `.env.development`), then `.env`
//! - `WEBOOK__*` environment variables, `__` separating nested keys
//!   (`WEBOOK__CACHE__CACHE_TYPE=memory`, `WEBOOK__VERIFICATION__MAX_ATTEMPTS=5`)

use ::config::{Config, Environment as EnvSource};
use wb_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix of environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "WEBOOK";

/// Load application configuration from defaults, `.env` files and the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok(); // Load .env file if present

    build_config(environment, EnvSource::with_prefix(ENV_PREFIX))
}

/// Layer `source` over the defaults for `environment`
fn build_config(environment: Environment, source: EnvSource) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::for_environment(environment);

    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(source.separator("__").try_parsing(true))
        .build()?
        .try_deserialize()?;

    validate(&config)?;

    tracing::debug!(
        environment = %config.environment,
        cache_type = ?config.cache.cache_type,
        "Configuration loaded"
    );

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    let verification = &config.verification;
    if verification.expiration_seconds == 0 {
        return Err(InfrastructureError::Config(
            "verification.expiration_seconds must be positive".to_string(),
        ));
    }
    if verification.resend_interval_seconds > verification.expiration_seconds {
        return Err(InfrastructureError::Config(
            "verification.resend_interval_seconds must not exceed expiration_seconds".to_string(),
        ));
    }
    if verification.max_attempts == 0 {
        return Err(InfrastructureError::Config(
            "verification.max_attempts must be positive".to_string(),
        ));
    }
    if config.user_cache.repopulate_queue_capacity == 0 {
        return Err(InfrastructureError::Config(
            "user_cache.repopulate_queue_capacity must be positive".to_string(),
        ));
    }
    Ok(())
}
