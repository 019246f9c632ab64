//! Environment-driven configuration.

use std::env;

use anyhow::{Context, Result};

pub const DEFAULT_RUN_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_SLA_SECS: u64 = 600;

/// Load `.env` (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    /// Seconds between watch-loop runs.
    pub run_interval_secs: u64,
    /// Run-duration threshold that triggers an SLA warning.
    pub sla_secs: u64,
}

impl Settings {
    /// Build settings from environment variables (call [`load_dotenv`]
    /// first). `DATABASE_URL` is mandatory; the interval and SLA
    /// thresholds have documented defaults.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL is not set in the environment")?;
        Ok(Self {
            database_url,
            run_interval_secs: env_u64("PJW_RUN_INTERVAL_SECS", DEFAULT_RUN_INTERVAL_SECS),
            sla_secs: env_u64("PJW_SLA_SECS", DEFAULT_SLA_SECS),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
