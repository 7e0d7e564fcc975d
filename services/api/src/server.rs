use crate::cli::ServeArgs;
use crate::infra::{build_services, AppState};
use crate::routes::with_saw_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use saw_engine::config::AppConfig;
use saw_engine::error::AppError;
use saw_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config.server);
    telemetry::init(&config.telemetry)?;

    let readiness = Arc::new(AtomicBool::new(false));
    let app = build_app(&config, Arc::clone(&readiness));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);
    info!(?config.environment, %addr, "saw decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

// The prometheus pair installs the global recorder, so this runs once per process.
fn build_app(config: &AppConfig, readiness: Arc<AtomicBool>) -> Router {
    let (metrics_layer, metrics_handle) = PrometheusMetricLayer::pair();
    let state = AppState {
        readiness,
        metrics: Arc::new(metrics_handle),
    };

    with_saw_routes(build_services(config))
        .layer(Extension(state))
        .layer(metrics_layer)
}
