use crate::cli::ServeArgs;
use crate::infra::{AppState, Upstreams};
use crate::routes::with_search_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use magang_scout::config::AppConfig;
use magang_scout::error::AppError;
use magang_scout::listings::ListingSearch;
use magang_scout::telemetry;
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

    let upstreams = Upstreams::from_config(&config.upstream)?;
    let search = Arc::new(ListingSearch::new(upstreams.listings));

    let app = with_search_routes(upstreams.regions, search)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        region_api = %config.upstream.region_base_url,
        vacancy_api = %config.upstream.vacancy_url,
        "internship search service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
