use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::DisplayListing;
use super::provider::{ListingError, ListingProvider};
use super::query::ListingQuery;
use super::search::{ListingSearch, SearchSnapshot};
use crate::filters::{coerce_limit, FilterError, OrderBy, OrderDirection, DEFAULT_LIMIT};
use crate::regions::RegionCode;

/// Scored vacancy search over HTTP.
pub fn listing_router<P>(search: Arc<ListingSearch<P>>) -> Router
where
    P: ListingProvider + 'static,
{
    Router::new()
        .route("/api/vacancies", get(vacancies_handler::<P>))
        .route("/api/vacancies/latest", get(latest_handler::<P>))
        .with_state(search)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VacancyParams {
    #[serde(default)]
    pub(crate) keyword: Option<String>,
    #[serde(default)]
    pub(crate) order_by: Option<String>,
    #[serde(default)]
    pub(crate) order_direction: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<String>,
    #[serde(default)]
    pub(crate) kode_provinsi: Option<String>,
    #[serde(default)]
    pub(crate) kode_kabupaten: Option<String>,
}

impl VacancyParams {
    pub(crate) fn into_query(self) -> Result<ListingQuery, FilterError> {
        let order_by = match non_blank(self.order_by) {
            Some(raw) => OrderBy::parse(&raw).ok_or(FilterError::InvalidOrderBy(raw))?,
            None => OrderBy::default(),
        };
        let order_direction = match non_blank(self.order_direction) {
            Some(raw) => {
                OrderDirection::parse(&raw).ok_or(FilterError::InvalidOrderDirection(raw))?
            }
            None => OrderDirection::default(),
        };
        let province_code = non_blank(self.kode_provinsi);
        let regency_code = non_blank(self.kode_kabupaten)
            .map(|code| RegionCode::new(code).query_value())
            .filter(|code| !code.is_empty());
        if regency_code.is_some() && province_code.is_none() {
            return Err(FilterError::NoProvinceSelected);
        }

        Ok(ListingQuery {
            order_by,
            order_direction,
            limit: self
                .limit
                .as_deref()
                .map(coerce_limit)
                .unwrap_or(DEFAULT_LIMIT),
            keyword: non_blank(self.keyword),
            province_code,
            regency_code,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Serialize)]
pub struct VacancySearchResponse {
    pub count: usize,
    pub listings: Vec<DisplayListing>,
}

pub(crate) async fn vacancies_handler<P>(
    State(search): State<Arc<ListingSearch<P>>>,
    Query(params): Query<VacancyParams>,
) -> Response
where
    P: ListingProvider + 'static,
{
    let query = match params.into_query() {
        Ok(query) => query,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match search.try_query(&query).await {
        Ok(listings) => {
            let body = VacancySearchResponse {
                count: listings.len(),
                listings,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(ListingError::Status(status)) => {
            let payload = json!({
                "error": "failed to fetch vacancies from the listing provider",
            });
            (status, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": "internal server error",
                "message": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Results of the most recently issued search and whether it is still running.
pub(crate) async fn latest_handler<P>(
    State(search): State<Arc<ListingSearch<P>>>,
) -> Json<SearchSnapshot>
where
    P: ListingProvider + 'static,
{
    Json(search.snapshot())
}
