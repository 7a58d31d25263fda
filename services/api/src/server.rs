use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPlanRepository};
use crate::routes::with_plan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nutriveda::config::AppConfig;
use nutriveda::error::AppError;
use nutriveda::telemetry;
use nutriveda::workflows::diet_plan::DietPlanService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let repository = Arc::new(InMemoryPlanRepository::default());
    let plan_service = Arc::new(DietPlanService::new(repository, config.engine.clone())?);

    let app = with_plan_routes(plan_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        assessment_mode = ?config.engine.assessment_mode,
        "diet plan service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
