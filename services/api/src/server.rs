use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotStore};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use taskdesk::config::AppConfig;
use taskdesk::error::AppError;
use taskdesk::performance::{DashboardSnapshot, EvaluationConfig, EvaluationService};
use taskdesk::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.snapshot.take() {
        config.snapshot.seed_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let evaluation_service = Arc::new(EvaluationService::new(
        Arc::new(InMemorySnapshotStore::default()),
        EvaluationConfig::standard(),
    ));

    if let Some(path) = &config.snapshot.seed_path {
        let receipt = evaluation_service.install(DashboardSnapshot::from_path(path)?)?;
        info!(
            path = %path.display(),
            employees = receipt.employees,
            issues = receipt.issues.len(),
            "seeded dashboard snapshot"
        );
    }

    let app = with_evaluation_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "performance evaluation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
