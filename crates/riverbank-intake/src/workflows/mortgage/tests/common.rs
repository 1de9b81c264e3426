use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use apache_avro::from_avro_datum;
use apache_avro::types::Value as AvroValue;
use async_trait::async_trait;
use axum::response::Response;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use serde_json::{json, Value};

use crate::workflows::mortgage::encoder::{unframe, AvroRecordEncoder};
use crate::workflows::mortgage::error::{PublishError, RegistryError};
use crate::workflows::mortgage::publisher::{Delivery, RecordPublisher};
use crate::workflows::mortgage::registry::SchemaRegistry;
use crate::workflows::mortgage::schema::mortgage_application_schema;
use crate::workflows::mortgage::service::MortgageApplicationService;

pub(super) const TOPIC: &str = "mortgage_applications";

pub(super) fn john_doe_payload() -> Value {
    json!({
        "name": "John Doe",
        "property_value": 500000,
        "loan_amount": 400000,
        "annual_income": 120000
    })
}

pub(super) fn body(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("payload serializes")
}

/// Registry that hands out sequential ids per subject and counts calls.
#[derive(Default)]
pub(super) struct MemoryRegistry {
    subjects: Mutex<HashMap<String, u32>>,
    calls: AtomicUsize,
}

impl MemoryRegistry {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn subjects(&self) -> Vec<String> {
        self.subjects
            .lock()
            .expect("registry mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SchemaRegistry for MemoryRegistry {
    async fn register(&self, subject: &str, _schema: &str) -> Result<u32, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.subjects.lock().expect("registry mutex poisoned");
        let next = guard.len() as u32 + 100;
        Ok(*guard.entry(subject.to_string()).or_insert(next))
    }
}

/// Registry answering every registration with 503.
pub(super) struct UnavailableRegistry;

#[async_trait]
impl SchemaRegistry for UnavailableRegistry {
    async fn register(&self, subject: &str, _schema: &str) -> Result<u32, RegistryError> {
        Err(RegistryError::Rejected {
            subject: subject.to_string(),
            status: 503,
            message: "Service Unavailable".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub(super) struct PublishedMessage {
    pub(super) key: Vec<u8>,
    pub(super) payload: Vec<u8>,
}

#[derive(Default)]
pub(super) struct MemoryPublisher {
    messages: Mutex<Vec<PublishedMessage>>,
}

impl MemoryPublisher {
    pub(super) fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().expect("publisher mutex poisoned").clone()
    }
}

#[async_trait]
impl RecordPublisher for MemoryPublisher {
    fn topic(&self) -> &str {
        TOPIC
    }

    async fn publish(&self, key: &[u8], payload: &[u8]) -> Result<Delivery, PublishError> {
        let mut guard = self.messages.lock().expect("publisher mutex poisoned");
        guard.push(PublishedMessage {
            key: key.to_vec(),
            payload: payload.to_vec(),
        });
        Ok(Delivery {
            partition: 0,
            offset: guard.len() as i64 - 1,
        })
    }
}

pub(super) struct BrokerDownPublisher;

#[async_trait]
impl RecordPublisher for BrokerDownPublisher {
    fn topic(&self) -> &str {
        TOPIC
    }

    async fn publish(&self, _key: &[u8], _payload: &[u8]) -> Result<Delivery, PublishError> {
        Err(PublishError::Kafka(KafkaError::MessageProduction(
            RDKafkaErrorCode::AllBrokersDown,
        )))
    }
}

pub(super) fn encoder<R: SchemaRegistry + 'static>(
    registry: Arc<R>,
    cache_schema_id: bool,
) -> AvroRecordEncoder<R> {
    AvroRecordEncoder::new(registry, TOPIC, cache_schema_id).expect("schema parses")
}

pub(super) fn build_service() -> (
    MortgageApplicationService<MemoryRegistry, MemoryPublisher>,
    Arc<MemoryRegistry>,
    Arc<MemoryPublisher>,
) {
    let registry = Arc::new(MemoryRegistry::default());
    let publisher = Arc::new(MemoryPublisher::default());
    let service = MortgageApplicationService::new(encoder(registry.clone(), true), publisher.clone());
    (service, registry, publisher)
}

/// Unframes and decodes a published payload into field name → value.
pub(super) fn decode_payload(payload: &[u8]) -> (u32, HashMap<String, AvroValue>) {
    let (schema_id, mut datum) = unframe(payload).expect("confluent framing");
    let schema = mortgage_application_schema().expect("schema parses");
    let value = from_avro_datum(&schema, &mut datum, None).expect("datum decodes");
    let AvroValue::Record(fields) = value else {
        panic!("expected an avro record");
    };
    (schema_id, fields.into_iter().collect())
}

pub(super) fn string_field(fields: &HashMap<String, AvroValue>, name: &str) -> String {
    match fields.get(name) {
        Some(AvroValue::String(text)) => text.clone(),
        other => panic!("field {name} is not a string: {other:?}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
