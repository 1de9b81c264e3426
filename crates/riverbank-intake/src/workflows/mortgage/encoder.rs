use std::sync::Arc;

use apache_avro::Schema;
use tokio::sync::OnceCell;

use super::domain::MortgageApplicationRecord;
use super::error::EncodingError;
use super::registry::SchemaRegistry;
use super::schema::{
    encode_datum, mortgage_application_schema, value_subject, MORTGAGE_APPLICATION_SCHEMA,
};

/// Leading byte of every Confluent-framed payload.
pub const MAGIC_BYTE: u8 = 0;
/// Magic byte plus big-endian schema id.
pub const CONFLUENT_HEADER_LEN: usize = 5;

/// Encodes records as registry-framed Avro for one topic.
pub struct AvroRecordEncoder<R> {
    registry: Arc<R>,
    schema: Schema,
    subject: String,
    cache_schema_id: bool,
    schema_id: OnceCell<u32>,
}

impl<R> AvroRecordEncoder<R>
where
    R: SchemaRegistry + 'static,
{
    pub fn new(registry: Arc<R>, topic: &str, cache_schema_id: bool) -> Result<Self, EncodingError> {
        Ok(Self {
            registry,
            schema: mortgage_application_schema()?,
            subject: value_subject(topic),
            cache_schema_id,
            schema_id: OnceCell::new(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain Avro binary datum, no registry involved.
    pub fn encode_datum(&self, record: &MortgageApplicationRecord) -> Result<Vec<u8>, EncodingError> {
        Ok(encode_datum(&self.schema, record)?)
    }

    /// Registry-framed payload: magic byte, schema id, datum.
    pub async fn encode(&self, record: &MortgageApplicationRecord) -> Result<Vec<u8>, EncodingError> {
        let datum = self.encode_datum(record)?;
        let schema_id = self.schema_id().await?;
        Ok(frame(schema_id, &datum))
    }

    async fn schema_id(&self) -> Result<u32, EncodingError> {
        if !self.cache_schema_id {
            return Ok(self
                .registry
                .register(&self.subject, MORTGAGE_APPLICATION_SCHEMA)
                .await?);
        }

        let id = self
            .schema_id
            .get_or_try_init(|| self.registry.register(&self.subject, MORTGAGE_APPLICATION_SCHEMA))
            .await?;
        Ok(*id)
    }
}

pub fn frame(schema_id: u32, datum: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(CONFLUENT_HEADER_LEN + datum.len());
    payload.push(MAGIC_BYTE);
    payload.extend_from_slice(&schema_id.to_be_bytes());
    payload.extend_from_slice(datum);
    payload
}

/// Splits a framed payload into schema id and datum.
pub fn unframe(payload: &[u8]) -> Option<(u32, &[u8])> {
    if payload.len() < CONFLUENT_HEADER_LEN || payload[0] != MAGIC_BYTE {
        return None;
    }
    let id = u32::from_be_bytes([payload[1], payload[2], payload[3], payload[4]]);
    Some((id, &payload[CONFLUENT_HEADER_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_prefixes_magic_byte_and_big_endian_id() {
        let payload = frame(0x0102_0304, &[9, 8, 7]);
        assert_eq!(payload, vec![0, 1, 2, 3, 4, 9, 8, 7]);
        assert_eq!(unframe(&payload), Some((0x0102_0304, &[9u8, 8, 7][..])));
    }

    #[test]
    fn unframe_rejects_foreign_payloads() {
        assert_eq!(unframe(&[1, 0, 0, 0, 1, 5]), None);
        assert_eq!(unframe(&[0, 0, 1]), None);
    }
}
