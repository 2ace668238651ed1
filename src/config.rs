//! Environment-driven configuration.
//!
//! Binaries call `dotenvy::dotenv()` first so a local `.env` can supply these.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::models::performance::{CrossoverParams, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COMPUTE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub crossover: CrossoverParams,
    /// Deadline budget for one performance request, checked before computing.
    pub compute_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            crossover: CrossoverParams::default(),
            compute_timeout: Duration::from_millis(DEFAULT_COMPUTE_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            environment: get_environment(),
            port: env_or("PORT", DEFAULT_PORT),
            crossover: CrossoverParams::new(
                env_or("SMA_SHORT_WINDOW", DEFAULT_SHORT_WINDOW),
                env_or("SMA_LONG_WINDOW", DEFAULT_LONG_WINDOW),
            ),
            compute_timeout: Duration::from_millis(env_or(
                "COMPUTE_TIMEOUT_MS",
                DEFAULT_COMPUTE_TIMEOUT_MS,
            )),
        }
    }

    pub fn is_production(&self) -> bool {
        is_production(&self.environment)
    }
}

/// Deployment environment name from `APP_ENV`, defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = raw, default = %default, "Ignoring unparseable config value");
        default
    })
}
