//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::api::{DEFAULT_BASE_URL, WeatherApiConfig};

/// Debounce applied to submits, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: pass --api-key or set WEATHERAPI_KEY")]
    MissingApiKey,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Terminal weather client backed by weatherapi.com
#[derive(Parser, Debug, Clone)]
#[command(name = "skycast")]
#[command(about = "Current weather and a 4-day forecast in your terminal")]
pub struct Args {
    /// weatherapi.com API key
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API root, e.g. a local mock server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Quiet period before a submitted search hits the network
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// City to search for right away
    #[arg(long, short)]
    pub city: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Open the weather screen directly
    #[arg(long)]
    pub skip_landing: bool,

    /// Where log output goes (the terminal belongs to the UI)
    #[arg(long, default_value = "skycast.log")]
    pub log_file: PathBuf,
}

/// How the session begins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    pub city: Option<String>,
    pub theme_dark: bool,
    pub skip_landing: bool,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: WeatherApiConfig,
    pub debounce: Duration,
    pub start: StartOptions,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        validate_base_url(&args.base_url)?;

        // An explicit --city implies the weather screen
        let skip_landing = args.skip_landing || args.city.is_some();

        Ok(Self {
            api: WeatherApiConfig::new(api_key).with_base_url(args.base_url),
            debounce: Duration::from_millis(args.debounce_ms),
            start: StartOptions {
                city: args.city,
                theme_dark: args.dark,
                skip_landing,
            },
            log_file: args.log_file,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
