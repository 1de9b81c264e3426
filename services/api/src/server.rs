use crate::cli::ServeArgs;
use crate::infra::{AppState, IntakeService};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use riverbank_intake::config::AppConfig;
use riverbank_intake::error::AppError;
use riverbank_intake::telemetry;
use riverbank_intake::workflows::mortgage::{
    AvroRecordEncoder, HttpSchemaRegistry, KafkaPublisher,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(HttpSchemaRegistry::new(&config.registry)?);
    let encoder = AvroRecordEncoder::new(
        registry,
        &config.kafka.topic,
        config.registry.cache_schema_id,
    )?;
    let publisher = Arc::new(KafkaPublisher::new(&config.kafka)?);
    let service: Arc<IntakeService> =
        Arc::new(IntakeService::new(encoder, publisher.clone()));

    let app = with_application_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = ?config.environment,
        %addr,
        topic = %config.kafka.topic,
        registry = %config.registry.url,
        "mortgage intake ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    if let Err(err) = publisher.flush() {
        warn!(error = %err, "producer flush on shutdown failed");
    }
    info!("mortgage intake stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
