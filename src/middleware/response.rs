use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::database::models::Drone;

/// Success envelope shared by every catalog action:
/// `{ success, message?, drones?, types?, id_drone? }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drones: Option<Vec<Drone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_drone: Option<i64>,
}

impl ApiResponse {
    fn success() -> Self {
        Self {
            success: true,
            message: None,
            drones: None,
            types: None,
            id_drone: None,
        }
    }

    /// Result of a list action
    pub fn listing(drones: Vec<Drone>, types: Vec<String>) -> Self {
        Self {
            drones: Some(drones),
            types: Some(types),
            ..Self::success()
        }
    }

    /// Result of a create action
    pub fn created(id_drone: i64) -> Self {
        Self {
            id_drone: Some(id_drone),
            ..Self::message("Drone created successfully.")
        }
    }

    /// Success carrying only a human-readable message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success()
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
