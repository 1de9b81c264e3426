use std::sync::Arc;

use tracing::{info, warn};

use super::assembler::assemble_now;
use super::domain::{ApplicationSubmission, MortgageApplicationRecord};
use super::encoder::AvroRecordEncoder;
use super::error::SubmissionError;
use super::publisher::{Delivery, RecordPublisher};
use super::registry::SchemaRegistry;

/// Service composing validation, assembly, encoding and publishing.
///
/// Both collaborators are created once at startup and shared by every request.
pub struct MortgageApplicationService<R, P> {
    encoder: Arc<AvroRecordEncoder<R>>,
    publisher: Arc<P>,
}

impl<R, P> MortgageApplicationService<R, P>
where
    R: SchemaRegistry + 'static,
    P: RecordPublisher + 'static,
{
    pub fn new(encoder: AvroRecordEncoder<R>, publisher: Arc<P>) -> Self {
        Self {
            encoder: Arc::new(encoder),
            publisher,
        }
    }

    pub fn encoder(&self) -> &AvroRecordEncoder<R> {
        &self.encoder
    }

    /// Run the whole pipeline for one raw request body.
    pub async fn submit(&self, body: &[u8]) -> Result<MortgageApplicationRecord, SubmissionError> {
        let submission = ApplicationSubmission::from_slice(body).map_err(|err| {
            let err = SubmissionError::from(err);
            warn!(error = %err, "mortgage application rejected");
            err
        })?;
        self.submit_typed(submission).await
    }

    /// Assemble, encode and publish an already validated submission.
    pub async fn submit_typed(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<MortgageApplicationRecord, SubmissionError> {
        let record = assemble_now(submission);
        let Delivery { partition, offset } = self.publish(&record).await.map_err(|err| {
            warn!(
                application_id = %record.application_id,
                error = %err,
                "mortgage application not published"
            );
            err
        })?;

        info!(
            application_id = %record.application_id,
            applicant_id = %record.applicant_id,
            topic = self.publisher.topic(),
            partition,
            offset,
            "mortgage application published"
        );
        Ok(record)
    }

    async fn publish(&self, record: &MortgageApplicationRecord) -> Result<Delivery, SubmissionError> {
        let payload = self.encoder.encode(record).await?;
        let delivery = self
            .publisher
            .publish(record.customer_email.as_bytes(), &payload)
            .await?;
        Ok(delivery)
    }
}
