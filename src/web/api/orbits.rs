use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::trajectory::{
    project, OrbitPoint, TrajectoryError, TrajectoryWindow, DEFAULT_HOURS_AHEAD,
    DEFAULT_STEP_MINUTES,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrbitQuery {
    pub norad_id: u32,
    pub hours_ahead: Option<f64>,
    pub step_minutes: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/satellite_orbits",
    tag = "satellites",
    params(
        ("norad_id" = u32, Query, description = "NORAD catalog number"),
        ("hours_ahead" = Option<f64>, Query, description = "How far ahead to project (hours, default 2)"),
        ("step_minutes" = Option<u32>, Query, description = "Spacing between points (minutes, default 10)")
    ),
    responses(
        (status = 200, description = "Future ground track", body = Vec<OrbitPoint>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Satellite not in the current snapshot", body = ErrorResponse)
    )
)]
pub async fn satellite_orbit(
    State(state): State<AppState>,
    params: Result<Query<OrbitQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<OrbitPoint>>> {
    let Query(params) = params?;
    let window = TrajectoryWindow::new(
        params.hours_ahead.unwrap_or(DEFAULT_HOURS_AHEAD),
        params.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES),
        state.config.orbit.max_hours_ahead,
    )?;

    let snapshot = state.cache.read();
    let points = project(
        &snapshot,
        state.propagator.as_ref(),
        params.norad_id,
        window,
        Utc::now(),
    )?
    .collect::<Result<Vec<_>, _>>()
    .map_err(TrajectoryError::from)?;

    Ok(Json(points))
}
