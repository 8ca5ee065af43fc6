use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::cache::CacheStatus;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Satellite Position API is running.".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "Size and age of the cached snapshot", body = CacheStatus)
    )
)]
pub async fn status(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.cache.read().status())
}
