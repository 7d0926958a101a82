use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub matching: MatchingConfig,
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

        let matching = MatchingConfig {
            max_concurrent_evaluations: positive_var(
                "MATCH_MAX_CONCURRENT_EVALUATIONS",
                MatchingConfig::DEFAULT_MAX_CONCURRENT_EVALUATIONS,
            )?,
            embedding_dimension: positive_var(
                "MATCH_EMBEDDING_DIMENSION",
                MatchingConfig::DEFAULT_EMBEDDING_DIMENSION,
            )?,
            ranking_limit: positive_var(
                "MATCH_RANKING_LIMIT",
                MatchingConfig::DEFAULT_RANKING_LIMIT,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching,
        })
    }
}

fn positive_var(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidPositive { name, value: raw }),
        },
        Err(_) => Ok(default),
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

/// Knobs for the scoring engine and the endpoints wrapping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Upper bound on evaluations hitting the embedding provider at once.
    pub max_concurrent_evaluations: usize,
    pub embedding_dimension: usize,
    pub ranking_limit: usize,
}

impl MatchingConfig {
    pub const DEFAULT_MAX_CONCURRENT_EVALUATIONS: usize = 4;
    pub const DEFAULT_EMBEDDING_DIMENSION: usize = 256;
    pub const DEFAULT_RANKING_LIMIT: usize = 5;
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_concurrent_evaluations: Self::DEFAULT_MAX_CONCURRENT_EVALUATIONS,
            embedding_dimension: Self::DEFAULT_EMBEDDING_DIMENSION,
            ranking_limit: Self::DEFAULT_RANKING_LIMIT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPositive { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPositive { name, value } => {
                write!(f, "{name} must be a positive integer (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPositive { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
