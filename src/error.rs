use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::{BookingDetail, SlotType};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("load limit exceeded")]
    LoadLimit {
        current: f64,
        requested: f64,
        allowed: f64,
    },

    /// Accumulated per-slot failures, keyed by slot type. Covers faculty,
    /// room, section and intra-request conflicts plus room availability.
    #[error("schedule conflicts detected")]
    Conflicts(BTreeMap<SlotType, String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("slot already booked")]
    AlreadyBooked {
        message: String,
        existing: BookingDetail,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": msg }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "success": false, "message": msg }),
            ),
            AppError::LoadLimit {
                current,
                requested,
                allowed,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "success": false,
                    "message": format!(
                        "Load Limit Exceeded: adding this subject ({requested} units) will \
                         result in {} units which exceeds max {allowed}.",
                        current + requested
                    ),
                    "current_load_units": current,
                    "requested_units": requested,
                    "allowed_units": allowed,
                }),
            ),
            AppError::Conflicts(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "success": false,
                    "message": "Schedule conflicts detected",
                    "errors": errors,
                }),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                json!({ "success": false, "message": msg }),
            ),
            AppError::AlreadyBooked { message, existing } => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": message,
                    "existing_assignment": existing,
                }),
            ),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Server error during the operation. Please try again.",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
