use std::time::Duration;

use async_trait::async_trait;
use rdkafka::error::KafkaResult;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;

use super::error::PublishError;
use crate::config::KafkaConfig;

/// Broker acknowledgement for a published record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Outbound hook for encoded records, so the service can be exercised without a broker.
#[async_trait]
pub trait RecordPublisher: Send + Sync {
    fn topic(&self) -> &str;
    async fn publish(&self, key: &[u8], payload: &[u8]) -> Result<Delivery, PublishError>;
}

/// Kafka producer bound to a single topic.
pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
    message_timeout: Duration,
}

impl KafkaPublisher {
    pub fn new(config: &KafkaConfig) -> KafkaResult<Self> {
        let producer: FutureProducer = client_config(config).create()?;
        Ok(Self {
            producer,
            topic: config.topic.clone(),
            message_timeout: config.message_timeout,
        })
    }

    /// Drains anything still queued; called on shutdown.
    pub fn flush(&self) -> KafkaResult<()> {
        self.producer.flush(self.message_timeout)
    }
}

pub(crate) fn client_config(config: &KafkaConfig) -> ClientConfig {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", &config.bootstrap_servers)
        .set("security.protocol", &config.security_protocol)
        .set(
            "message.timeout.ms",
            config.message_timeout.as_millis().to_string(),
        );
    if config
        .security_protocol
        .to_ascii_uppercase()
        .starts_with("SASL_")
    {
        client.set("sasl.mechanism", &config.sasl_mechanism);
    }
    if let Some(username) = &config.api_key {
        client
            .set("sasl.username", username)
            .set(
                "sasl.password",
                config.api_secret.as_deref().unwrap_or_default(),
            );
    }
    client
}

#[async_trait]
impl RecordPublisher for KafkaPublisher {
    fn topic(&self) -> &str {
        &self.topic
    }

    async fn publish(&self, key: &[u8], payload: &[u8]) -> Result<Delivery, PublishError> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);
        let (partition, offset) = self
            .producer
            .send(record, self.message_timeout)
            .await
            .map_err(|(err, _)| PublishError::Kafka(err))?;
        Ok(Delivery { partition, offset })
    }
}
