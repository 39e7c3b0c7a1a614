use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use atlas_core::countries::Country;
use axum::{
    extract::{Path, RawQuery, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RefreshResponse {
    message: String,
    last_refreshed_at: DateTime<Utc>,
    countries: usize,
    multiplier: u32,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    message: String,
    deleted: usize,
}

async fn refresh_countries(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let summary = state.country_service.refresh().await?;
    Ok(Json(RefreshResponse {
        message: format!(
            "Refreshed {} countries ({} with exchange rates)",
            summary.countries, summary.matched_rates
        ),
        last_refreshed_at: summary.last_refreshed_at,
        countries: summary.countries,
        multiplier: summary.multiplier,
    }))
}

/// Decode the raw query string into ordered `field=value` pairs.
fn parse_filters(query: Option<String>) -> ApiResult<Vec<(String, String)>> {
    match query {
        Some(q) if !q.is_empty() => serde_urlencoded::from_str(&q)
            .map_err(|e| ApiError::BadRequest(format!("Malformed query string: {}", e))),
        _ => Ok(Vec::new()),
    }
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<Country>>> {
    let filters = parse_filters(query)?;
    let countries = state.country_service.search_countries(&filters)?;
    Ok(Json(countries))
}

async fn get_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Country>> {
    let country = state.country_service.get_country(&name)?;
    Ok(Json(country))
}

async fn delete_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state.country_service.delete_country(&name).await?;
    Ok(Json(DeleteResponse {
        message: format!("Deleted country '{}'", name),
        deleted,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries/refresh", post(refresh_countries))
        .route("/refresh", post(refresh_countries))
        .route("/countries", get(list_countries))
        .route("/countries/{name}", get(get_country).delete(delete_country))
}
