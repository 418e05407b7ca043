use crate::cli::ServeArgs;
use crate::demo::seed_marketplace;
use crate::infra::{AppState, InMemoryMarketplace, InMemoryNotifier};
use crate::routes::with_staffing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use extrataff::config::AppConfig;
use extrataff::error::AppError;
use extrataff::staffing::hiring::StaffingService;
use extrataff::staffing::matching::MatchWeights;
use extrataff::telemetry;
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

    let repository = Arc::new(InMemoryMarketplace::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    if args.seed_demo {
        seed_marketplace(&repository);
        info!("seeded demo missions and talent profile");
    }
    let staffing_service = Arc::new(StaffingService::new(
        repository,
        notifier,
        MatchWeights::default(),
    ));

    let app = with_staffing_routes(staffing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "extrataff staffing marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
