use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{RegionCode, RegionListing};
use super::provider::{RegionError, RegionProvider};

/// Passthrough endpoints for the region provider.
pub fn region_router<P>(provider: Arc<P>) -> Router
where
    P: RegionProvider + 'static,
{
    Router::new()
        .route("/api/provinces", get(provinces_handler::<P>))
        .route("/api/regencies", get(regencies_handler::<P>))
        .with_state(provider)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegencyParams {
    #[serde(default)]
    pub(crate) code: Option<String>,
}

pub(crate) async fn provinces_handler<P>(State(provider): State<Arc<P>>) -> Response
where
    P: RegionProvider + 'static,
{
    match provider.provinces().await {
        Ok(data) => (StatusCode::OK, Json(RegionListing { data })).into_response(),
        Err(RegionError::Status(status)) => {
            warn!(%status, "region provider rejected province lookup");
            let payload = json!({
                "error": "failed to fetch provinces from the region provider",
            });
            (status, Json(payload)).into_response()
        }
        Err(other) => {
            warn!(error = %other, "province lookup failed");
            let payload = json!({
                "error": "internal server error",
                "message": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn regencies_handler<P>(
    State(provider): State<Arc<P>>,
    Query(params): Query<RegencyParams>,
) -> Response
where
    P: RegionProvider + 'static,
{
    let code = RegionCode::new(params.code.unwrap_or_default());
    if code.is_empty() {
        let payload = json!({ "error": "missing province code" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    match provider.regencies(&code).await {
        Ok(data) => (StatusCode::OK, Json(RegionListing { data })).into_response(),
        Err(RegionError::Status(status)) => {
            warn!(province = %code, %status, "region provider rejected regency lookup");
            let payload = json!({
                "error": "failed to fetch regencies from the region provider",
            });
            (status, Json(payload)).into_response()
        }
        Err(other) => {
            warn!(province = %code, error = %other, "regency lookup failed");
            let payload = json!({ "error": "failed to fetch regencies" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
