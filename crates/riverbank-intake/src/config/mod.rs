use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub registry: RegistryConfig,
    pub kafka: KafkaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let registry = RegistryConfig {
            url: required("SCHEMA_REGISTRY_URL")?,
            api_key: optional("SCHEMA_REGISTRY_API_KEY"),
            api_secret: optional("SCHEMA_REGISTRY_API_SECRET"),
            cache_schema_id: parse_bool("SCHEMA_REGISTRY_CACHE_SCHEMA_ID", true)?,
        };

        let message_timeout_ms = match optional("KAFKA_MESSAGE_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    var: "KAFKA_MESSAGE_TIMEOUT_MS",
                    value: raw,
                })?,
            None => 30_000,
        };

        let kafka = KafkaConfig {
            bootstrap_servers: required("KAFKA_BOOTSTRAP_SERVERS")?,
            api_key: optional("KAFKA_API_KEY"),
            api_secret: optional("KAFKA_API_SECRET"),
            security_protocol: optional("KAFKA_SECURITY_PROTOCOL")
                .unwrap_or_else(|| "SASL_SSL".to_string()),
            sasl_mechanism: optional("KAFKA_SASL_MECHANISM").unwrap_or_else(|| "PLAIN".to_string()),
            topic: optional("KAFKA_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            message_timeout: Duration::from_millis(message_timeout_ms),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            registry,
            kafka,
        })
    }
}

/// Topic mortgage applications land on unless `KAFKA_TOPIC` says otherwise.
pub const DEFAULT_TOPIC: &str = "mortgage_applications";

fn optional(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing { var })
}

fn parse_bool(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = optional(var) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value: raw }),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Schema registry endpoint and credentials.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Resolve the schema id once per process instead of on every encode.
    pub cache_schema_id: bool,
}

/// Broker connection and delivery settings for the producer.
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub bootstrap_servers: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub security_protocol: String,
    pub sasl_mechanism: String,
    pub topic: String,
    pub message_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Missing { var: &'static str },
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Missing { var } => write!(f, "{var} must be set"),
            ConfigError::Invalid { var, value } => {
                write!(f, "{var} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::Missing { .. } | ConfigError::Invalid { .. } => {
                None
            }
        }
    }
}
