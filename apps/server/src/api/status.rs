use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use atlas_core::countries::CountryStatus;
use axum::{extract::State, routing::get, Json, Router};

async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<CountryStatus>> {
    let status = state.country_service.get_status()?;
    Ok(Json(status))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}
