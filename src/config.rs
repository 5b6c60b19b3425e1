use anyhow::{bail, Context};
use std::env;
use std::str::FromStr;

pub const DEFAULT_API_PORT: u16 = 3001;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub history_capacity: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so parsing can be tested without
    /// touching the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_port = match lookup("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("API_PORT must be a valid port number (1-65535)")?,
            None => defaults.api_port,
        };

        let history_capacity = match lookup("HISTORY_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("HISTORY_CAPACITY must be a positive integer")?,
            None => defaults.history_capacity,
        };
        if history_capacity == 0 {
            bail!("HISTORY_CAPACITY must be at least 1");
        }

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            api_port,
            history_capacity,
            log_format,
        })
    }
}
