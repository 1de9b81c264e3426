use metrics_exporter_prometheus::PrometheusHandle;
use riverbank_intake::workflows::mortgage::{
    HttpSchemaRegistry, KafkaPublisher, MortgageApplicationService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Concrete pipeline wired against the real registry and broker.
pub(crate) type IntakeService = MortgageApplicationService<HttpSchemaRegistry, KafkaPublisher>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}
