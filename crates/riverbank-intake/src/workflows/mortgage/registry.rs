use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::error::RegistryError;
use crate::config::RegistryConfig;

const SCHEMA_REGISTRY_CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Register-or-lookup access to a schema registry, keyed by subject.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    /// Returns the id of `schema` under `subject`, registering it when new.
    async fn register(&self, subject: &str, schema: &str) -> Result<u32, RegistryError>;
}

/// Confluent-compatible registry reached over its REST API.
#[derive(Debug, Clone)]
pub struct HttpSchemaRegistry {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RegisteredSchema {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RegistryFailure {
    #[serde(default)]
    message: Option<String>,
}

impl HttpSchemaRegistry {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        let credentials = match (&config.api_key, &config.api_secret) {
            (Some(key), Some(secret)) => Some((key.clone(), secret.clone())),
            (Some(key), None) => Some((key.clone(), String::new())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SchemaRegistry for HttpSchemaRegistry {
    async fn register(&self, subject: &str, schema: &str) -> Result<u32, RegistryError> {
        let url = format!("{}/subjects/{}/versions", self.base_url, subject);
        tracing::debug!(%url, "registering schema");

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, SCHEMA_REGISTRY_CONTENT_TYPE)
            .json(&json!({ "schema": schema }));
        if let Some((key, secret)) = &self.credentials {
            request = request.basic_auth(key, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RegistryFailure>(&body)
                .ok()
                .and_then(|failure| failure.message)
                .unwrap_or(body);
            return Err(RegistryError::Rejected {
                subject: subject.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let registered: RegisteredSchema = response.json().await?;
        tracing::info!(subject, schema_id = registered.id, "schema registered");
        Ok(registered.id)
    }
}
