use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::catalog::PriceRange;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub market: MarketConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let listings_csv = env::var("MARKET_LISTINGS_CSV")
            .unwrap_or_else(|_| "data/airbnb-london.csv".to_string())
            .into();
        let search_history = env::var("MARKET_SEARCH_HISTORY")
            .unwrap_or_else(|_| "search-words.txt".to_string())
            .into();
        let initial_range = initial_range(
            optional_price("MARKET_MIN_PRICE")?,
            optional_price("MARKET_MAX_PRICE")?,
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            market: MarketConfig {
                listings_csv,
                search_history,
                initial_range,
            },
        })
    }
}

fn optional_price(variable: &'static str) -> Result<Option<u32>, ConfigError> {
    match env::var(variable) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidPrice { variable }),
        Err(_) => Ok(None),
    }
}

fn initial_range(min: Option<u32>, max: Option<u32>) -> Result<Option<PriceRange>, ConfigError> {
    match (min, max) {
        (Some(min), Some(max)) => PriceRange::new(min, max)
            .map(Some)
            .map_err(|_| ConfigError::InvertedRange { min, max }),
        (None, None) => Ok(None),
        _ => Err(ConfigError::IncompleteRange),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Listing data and search log locations.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub listings_csv: PathBuf,
    pub search_history: PathBuf,
    pub initial_range: Option<PriceRange>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPrice { variable: &'static str },
    InvertedRange { min: u32, max: u32 },
    IncompleteRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPrice { variable } => {
                write!(f, "{variable} must be a non-negative whole number")
            }
            ConfigError::InvertedRange { min, max } => write!(
                f,
                "MARKET_MAX_PRICE ({max}) must not be below MARKET_MIN_PRICE ({min})"
            ),
            ConfigError::IncompleteRange => write!(
                f,
                "MARKET_MIN_PRICE and MARKET_MAX_PRICE must be set together"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPrice { .. }
            | ConfigError::InvertedRange { .. }
            | ConfigError::IncompleteRange => None,
        }
    }
}
