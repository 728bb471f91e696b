use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("POSTGRES_URL must be set")]
    MissingDatabaseUrl,

    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("DB_ACQUIRE_TIMEOUT_SECS ({acquire}s) must be less than DB_STATEMENT_TIMEOUT_SECS ({statement}s)")]
    AcquireTimeoutTooLong { acquire: u64, statement: u64 },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("POSTGRES_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let acquire = number(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?;
        let statement = number(&lookup, "DB_STATEMENT_TIMEOUT_SECS", 10)?;
        // A pool that cannot hand out a connection must fail before the
        // statement deadline, or an unreachable database reads as a timeout.
        if acquire >= statement {
            return Err(ConfigError::AcquireTimeoutTooLong { acquire, statement });
        }

        Ok(Self {
            database_url,
            max_connections: number(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(acquire),
            statement_timeout: Duration::from_secs(statement),
        })
    }
}

fn number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(ConfigError::InvalidNumber { key, value }),
        },
    }
}
