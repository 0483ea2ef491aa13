use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use ratesync_market_data::DEFAULT_BASE_URL;

const ENV_PREFIX: &str = "RATESYNC_";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub scheduler_enabled: bool,
    pub sync_interval: Duration,
    pub log_format: String,
}

impl Config {
    /// Reads `RATESYNC_*` variables, loading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Builds the configuration from `lookup`, which receives unprefixed keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr_raw = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let listen_addr: SocketAddr = listen_addr_raw
            .parse()
            .with_context(|| format!("Invalid {ENV_PREFIX}LISTEN_ADDR: {listen_addr_raw}"))?;
        let db_path = lookup("DB_PATH").unwrap_or_else(|| "./db/exchange_rates.db".into());
        let upstream_url = lookup("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let upstream_timeout_ms = parse_or(lookup("UPSTREAM_TIMEOUT_MS"), 10_000);
        let request_timeout_ms = parse_or(lookup("REQUEST_TIMEOUT_MS"), 30_000);
        let cors_allow = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let scheduler_enabled = parse_or(lookup("SCHEDULER_ENABLED"), true);
        let sync_interval_secs = parse_or(lookup("SYNC_INTERVAL_SECS"), 2 * 60 * 60);
        let log_format = lookup("LOG_FORMAT").unwrap_or_else(|| "text".into());

        Ok(Self {
            listen_addr,
            db_path,
            upstream_url,
            upstream_timeout: Duration::from_millis(upstream_timeout_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
            cors_allow,
            scheduler_enabled,
            sync_interval: Duration::from_secs(sync_interval_secs.max(1)),
            log_format,
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
