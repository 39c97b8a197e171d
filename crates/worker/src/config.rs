use std::time::Duration;

/// Default interval between session sweeps.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("SESSION_SWEEP_INTERVAL_SECS must be a positive integer, got '{0}'")]
    InvalidSweepInterval(String),
}

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub sweep_interval: Duration,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Default  |
    /// |-------------------------------|----------|
    /// | `DATABASE_URL`                | required |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `3600`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let sweep_interval = match lookup("SESSION_SWEEP_INTERVAL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidSweepInterval(raw)),
            },
            None => Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        };

        Ok(Self {
            database_url,
            sweep_interval,
        })
    }
}
