//! Mortgage application intake: validate the form payload, pad it with
//! synthetic customer data, encode it against the registered Avro schema and
//! publish it to the applications topic.

pub mod assembler;
pub mod domain;
pub mod encoder;
pub mod error;
pub mod publisher;
pub mod registry;
pub mod router;
pub mod schema;
pub mod service;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use assembler::{assemble, assemble_now, resolve_identity};
pub use domain::{
    ApplicantId, ApplicationId, ApplicationSubmission, EmploymentStatus,
    MortgageApplicationRecord, SubmissionInputError, REQUIRED_FIELDS,
};
pub use encoder::AvroRecordEncoder;
pub use error::{
    ConversionError, EncodingError, PublishError, RegistryError, SubmissionError,
    ValidationError,
};
pub use publisher::{Delivery, KafkaPublisher, RecordPublisher};
pub use registry::{HttpSchemaRegistry, SchemaRegistry};
pub use router::{application_router, SUBMIT_PATH};
pub use service::MortgageApplicationService;
