use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use magang_scout::listings::{listing_router, ListingProvider, ListingSearch};
use magang_scout::regions::{region_router, RegionProvider};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_search_routes<R, L>(
    regions: Arc<R>,
    search: Arc<ListingSearch<L>>,
) -> axum::Router
where
    R: RegionProvider + 'static,
    L: ListingProvider + 'static,
{
    region_router(regions)
        .merge(listing_router(search))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use magang_scout::listings::{ListingError, ListingQuery, ListingRecord};
    use magang_scout::regions::{Region, RegionCode, RegionError};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct StaticRegions;

    impl RegionProvider for StaticRegions {
        async fn provinces(&self) -> Result<Vec<Region>, RegionError> {
            Ok(vec![Region::new("36", "BANTEN")])
        }

        async fn regencies(&self, _province: &RegionCode) -> Result<Vec<Region>, RegionError> {
            Ok(vec![Region::new("36.71", "KOTA TANGERANG")])
        }
    }

    struct StaticListings;

    impl ListingProvider for StaticListings {
        async fn fetch(&self, _query: &ListingQuery) -> Result<Vec<ListingRecord>, ListingError> {
            Ok(vec![ListingRecord::default()])
        }
    }

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn app(ready: bool) -> axum::Router {
        with_search_routes(
            Arc::new(StaticRegions),
            Arc::new(ListingSearch::new(Arc::new(StaticListings))),
        )
        .layer(Extension(app_state(ready)))
    }

    async fn get(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn service_exposes_region_and_vacancy_routes() {
        let (status, body) = get(app(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get(app(true), "/api/provinces").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "BANTEN");

        let (status, body) = get(app(true), "/api/regencies?code=36").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["code"], "36.71");

        let (status, _) = get(app(true), "/api/regencies").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(app(true), "/api/vacancies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["listings"][0]["admission"]["label"], "unavailable");
    }
}
