use crate::saw::{EngineConfig, MissingValuePolicy, DEFAULT_WEIGHT_TOLERANCE};
use std::env;
use std::net::{IpAddr, SocketAddr};

/// Deployment stage the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the decision service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&var_or("APP_ENV", "development"));

        let host = var_or("APP_HOST", "127.0.0.1");
        let port = var_or("APP_PORT", "3000")
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("APP_LOG_LEVEL", "info");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: engine_from_env()?,
            history: HistoryConfig {
                capacity: history_capacity_from_env()?,
            },
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn engine_from_env() -> Result<EngineConfig, ConfigError> {
    let weight_tolerance = match env::var("SAW_WEIGHT_TOLERANCE") {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidTolerance(raw.clone()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance(raw));
            }
            value
        }
        Err(_) => DEFAULT_WEIGHT_TOLERANCE,
    };

    let missing_values = match env::var("SAW_STRICT_VALUES") {
        Ok(raw) => {
            let flag = raw.trim().to_ascii_lowercase();
            match flag.as_str() {
                "1" | "true" | "yes" | "on" => MissingValuePolicy::Reject,
                "0" | "false" | "no" | "off" | "" => MissingValuePolicy::TreatAsZero,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        key: "SAW_STRICT_VALUES",
                        value: raw,
                    })
                }
            }
        }
        Err(_) => MissingValuePolicy::TreatAsZero,
    };

    Ok(EngineConfig {
        weight_tolerance,
        missing_values,
    })
}

fn history_capacity_from_env() -> Result<usize, ConfigError> {
    match env::var("HISTORY_CAPACITY") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => Ok(capacity),
            _ => Err(ConfigError::InvalidCapacity(raw)),
        },
        Err(_) => Ok(HistoryConfig::DEFAULT_CAPACITY),
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

/// Log filter fallback used when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Copy)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl HistoryConfig {
    pub const DEFAULT_CAPACITY: usize = 500;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("SAW_WEIGHT_TOLERANCE must be a finite, non-negative number (got '{0}')")]
    InvalidTolerance(String),
    #[error("{key} must be a boolean flag (got '{value}')")]
    InvalidFlag { key: &'static str, value: String },
    #[error("HISTORY_CAPACITY must be a positive integer (got '{0}')")]
    InvalidCapacity(String),
}
