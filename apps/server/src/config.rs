use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use atlas_core::countries::GdpMultiplier;
use atlas_sources::{DEFAULT_COUNTRIES_URL, DEFAULT_FETCH_TIMEOUT, DEFAULT_RATES_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub countries_url: String,
    pub rates_url: String,
    pub fetch_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub log_format: LogFormat,
    /// Use this multiplier for every refresh instead of drawing one.
    pub gdp_multiplier: Option<GdpMultiplier>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("ATLAS_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid ATLAS_LISTEN_ADDR")?;
        let db_path = var("ATLAS_DB_PATH", "./db/atlas.db");
        let countries_url = var("ATLAS_COUNTRIES_URL", DEFAULT_COUNTRIES_URL);
        let rates_url = var("ATLAS_RATES_URL", DEFAULT_RATES_URL);
        let fetch_timeout_ms: u64 = lookup("ATLAS_FETCH_TIMEOUT_MS")
            .map(|raw| raw.parse())
            .transpose()
            .context("Invalid ATLAS_FETCH_TIMEOUT_MS")?
            .unwrap_or(DEFAULT_FETCH_TIMEOUT.as_millis() as u64);
        let request_timeout_ms: u64 = var("ATLAS_REQUEST_TIMEOUT_MS", "60000")
            .parse()
            .context("Invalid ATLAS_REQUEST_TIMEOUT_MS")?;
        let cors_allow = var("ATLAS_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let log_format = match var("ATLAS_LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => return Err(anyhow!("Invalid ATLAS_LOG_FORMAT '{}'", other)),
        };
        let gdp_multiplier = match lookup("ATLAS_GDP_MULTIPLIER") {
            Some(raw) => {
                let value: u32 = raw.parse().context("Invalid ATLAS_GDP_MULTIPLIER")?;
                Some(GdpMultiplier::new(value)?)
            }
            None => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            countries_url,
            rates_url,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
            cors_allow,
            log_format,
            gdp_multiplier,
        })
    }
}
