use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub failure_rate_min: f64,
    pub failure_rate_max: f64,
    pub fault_seed: Option<u64>,
    pub seed_candidates: usize,
    pub seed_rng: Option<u64>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            database_url: get_env_or("DATABASE_URL", "sqlite::memory:"),
            latency_min_ms: get_env_parse_or("LATENCY_MIN_MS", 200)?,
            latency_max_ms: get_env_parse_or("LATENCY_MAX_MS", 1200)?,
            failure_rate_min: get_env_parse_or("FAILURE_RATE_MIN", 0.05)?,
            failure_rate_max: get_env_parse_or("FAILURE_RATE_MAX", 0.10)?,
            fault_seed: get_env_parse_opt("FAULT_SEED")?,
            seed_candidates: get_env_parse_or("SEED_CANDIDATES", 1000)?,
            seed_rng: get_env_parse_opt("SEED_RNG")?,
        };

        if config.latency_min_ms > config.latency_max_ms {
            return Err(Error::Config(
                "LATENCY_MIN_MS must not exceed LATENCY_MAX_MS".to_string(),
            ));
        }
        if config.failure_rate_min > config.failure_rate_max
            || !(0.0..=1.0).contains(&config.failure_rate_min)
            || !(0.0..=1.0).contains(&config.failure_rate_max)
        {
            return Err(Error::Config(
                "failure rates must form a sub-range of [0, 1]".to_string(),
            ));
        }

        Ok(config)
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
