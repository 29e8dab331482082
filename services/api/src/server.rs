use crate::cli::ServeArgs;
use crate::infra::{AppState, LoggingAlertPublisher};
use crate::routes::with_staffing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use worship_staffing::config::AppConfig;
use worship_staffing::error::AppError;
use worship_staffing::telemetry;
use worship_staffing::workflows::staffing::{RequirementRegistry, StaffingService};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let registry = Arc::new(RequirementRegistry::load(&config.staffing)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let alerts = Arc::new(LoggingAlertPublisher);
    let staffing_service = Arc::new(StaffingService::new(registry, alerts));

    let app = with_staffing_routes(staffing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "staffing analysis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
