// src/config.rs
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    events_enabled: bool,
    event_buffer_size: usize,
    report_rows_portrait: usize,
    report_rows_landscape: usize,
    page_size: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://frame.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(format!("{key} must be a boolean, got '{raw}'"))),
        },
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Build configuration from environment variables, after loading a `.env`
    /// file when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let biscuit_private_key = env::var("BISCUIT_ROOT_PRIVATE_KEY")
            .map_err(|_| ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;

        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = parse_var("TOKEN_TTL_SECONDS", 3600u64)?;
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_list(&raw))
            .unwrap_or_default();

        let page_size = parse_var("PAGE_SIZE", 10u32)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid("PAGE_SIZE must be positive".into()));
        }
        let report_rows_portrait = parse_var("REPORT_ROWS_PORTRAIT", 60usize)?;
        let report_rows_landscape = parse_var("REPORT_ROWS_LANDSCAPE", 40usize)?;
        if report_rows_portrait == 0 || report_rows_landscape == 0 {
            return Err(ConfigError::Invalid(
                "report rows per page must be positive".into(),
            ));
        }

        Ok(Self {
            database_url,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            events_enabled: parse_flag("EVENTS_ENABLED", true)?,
            event_buffer_size: parse_var("EVENT_BUFFER_SIZE", 1024usize)?,
            report_rows_portrait,
            report_rows_landscape,
            page_size,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Empty means any origin.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }

    pub fn report_rows_portrait(&self) -> usize {
        self.report_rows_portrait
    }

    pub fn report_rows_landscape(&self) -> usize {
        self.report_rows_landscape
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
