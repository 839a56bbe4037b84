// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    validator_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://emend.db".into()
}

fn default_validator_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Build configuration from environment variables, with defaults for
    /// everything optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());

        let validator_timeout_secs = match env::var("VALIDATOR_TIMEOUT_SECONDS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid("VALIDATOR_TIMEOUT_SECONDS must be an integer".into())
            })?,
            Err(_) => default_validator_timeout(),
        };
        if validator_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "VALIDATOR_TIMEOUT_SECONDS must be positive".into(),
            ));
        }

        Ok(Self {
            database_url,
            validator_timeout: Duration::from_secs(validator_timeout_secs),
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Upper bound an embedding application should place on the external
    /// validator call; the core never retries past it.
    pub fn validator_timeout(&self) -> Duration {
        self.validator_timeout
    }
}
