use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::trajectory::TrajectoryError;

pub enum ApiError {
    Validation(String),
    SatelliteNotFound(u32),
    Propagation(String),
}

impl From<TrajectoryError> for ApiError {
    fn from(e: TrajectoryError) -> Self {
        match e {
            TrajectoryError::UnknownSatellite(id) => ApiError::SatelliteNotFound(id),
            TrajectoryError::InvalidWindow(msg) => ApiError::Validation(msg),
            TrajectoryError::Propagation(e) => ApiError::Propagation(e.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::SatelliteNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(
                    "satellite_not_found",
                    &format!("Satellite with NORAD ID {} not found.", id),
                )),
            )
                .into_response(),
            ApiError::Propagation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("propagation_failed", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}
