use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::SubmissionInputError;

/// Client-side input problems, reported as 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// A present field whose value cannot be turned into the expected type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ConversionError {
    pub field: &'static str,
    pub reason: String,
}

impl ConversionError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures talking to the schema registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("schema registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("schema registry rejected subject '{subject}' ({status}): {message}")]
    Rejected {
        subject: String,
        status: u16,
        message: String,
    },
}

/// Failures turning a record into wire bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("record does not conform to schema: {0}")]
    Schema(#[from] apache_avro::Error),
}

/// Failures handing the payload to the broker.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("kafka delivery failed: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

/// Tagged outcome of a failed submission, mapped to a status code in one place.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Conversion(_)
            | SubmissionError::Encoding(_)
            | SubmissionError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SubmissionInputError> for SubmissionError {
    fn from(value: SubmissionInputError) -> Self {
        match value {
            SubmissionInputError::Validation(err) => Self::Validation(err),
            SubmissionInputError::Conversion(err) => Self::Conversion(err),
        }
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
