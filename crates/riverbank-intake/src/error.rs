use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::mortgage::{EncodingError, RegistryError};
use rdkafka::error::KafkaError;
use std::fmt;

/// Process-level failures: startup, serving and CLI commands.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Kafka(KafkaError),
    Registry(RegistryError),
    Encoding(EncodingError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Kafka(err) => write!(f, "kafka producer error: {}", err),
            AppError::Registry(err) => write!(f, "schema registry error: {}", err),
            AppError::Encoding(err) => write!(f, "encoding error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Kafka(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::Encoding(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<KafkaError> for AppError {
    fn from(value: KafkaError) -> Self {
        Self::Kafka(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<EncodingError> for AppError {
    fn from(value: EncodingError) -> Self {
        Self::Encoding(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
