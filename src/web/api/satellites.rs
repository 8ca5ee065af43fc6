use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::propagate::PositionSample;
use crate::query::{query, Page, SatelliteFilter, MAX_PAGE_SIZE};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SatelliteQuery {
    pub name: Option<String>,
    pub norad_id: Option<u32>,
    #[serde(rename = "type")]
    pub sat_type: Option<String>,
    pub mission: Option<String>,
    pub min_altitude: Option<f64>,
    pub max_altitude: Option<f64>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl SatelliteQuery {
    fn page(&self, default_page_size: usize) -> ApiResult<Page> {
        let number = self.page.unwrap_or(1);
        if number < 1 {
            return Err(ApiError::Validation("page must be at least 1".into()));
        }
        let size = self.page_size.unwrap_or(default_page_size);
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(ApiError::Validation(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Page::new(number, size))
    }

    fn filter(self) -> SatelliteFilter {
        SatelliteFilter {
            name: self.name,
            norad_id: self.norad_id,
            sat_type: self.sat_type,
            mission: self.mission,
            min_altitude: self.min_altitude,
            max_altitude: self.max_altitude,
        }
    }
}

#[utoipa::path(
    get,
    path = "/satellites",
    tag = "satellites",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the satellite name"),
        ("norad_id" = Option<u32>, Query, description = "Exact NORAD catalog number"),
        ("type" = Option<String>, Query, description = "Case-insensitive substring of the satellite type"),
        ("mission" = Option<String>, Query, description = "Case-insensitive substring of the mission description"),
        ("min_altitude" = Option<f64>, Query, description = "Minimum altitude in km (inclusive)"),
        ("max_altitude" = Option<f64>, Query, description = "Maximum altitude in km (inclusive)"),
        ("page" = Option<usize>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<usize>, Query, description = "Satellites per page (1-1000)")
    ),
    responses(
        (status = 200, description = "Matching satellite positions", body = Vec<PositionSample>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_satellites(
    State(state): State<AppState>,
    params: Result<Query<SatelliteQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PositionSample>>> {
    let Query(params) = params?;
    let page = params.page(state.config.web.default_page_size)?;
    let filter = params.filter();

    let snapshot = state.cache.read();
    let samples = query(&snapshot, &filter, page)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(samples))
}
