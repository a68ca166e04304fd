use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{log_requests, with_receipt_routes};
use axum::{middleware, Extension};
use axum_prometheus::PrometheusMetricLayer;
use receipt_points::config::AppConfig;
use receipt_points::error::AppError;
use receipt_points::receipts::{InMemoryScoreStore, ReceiptPointsService};
use receipt_points::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Some(Arc::new(prometheus_handle)),
    };

    let store = Arc::new(InMemoryScoreStore::new());
    let service = Arc::new(ReceiptPointsService::new(store));

    let app = with_receipt_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(middleware::from_fn(log_requests));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "receipt processor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
