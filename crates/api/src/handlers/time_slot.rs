use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
};
use fieldbook_core::models::time_slot::{CreateTimeSlotRequest, TimeSlotResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    Ok(Json(state.services.time_slots.get_all().await?))
}

pub async fn get_time_slot(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TimeSlotResponse>, AppError> {
    let Path(uuid) = path?;
    Ok(Json(state.services.time_slots.get_by_uuid(uuid).await?))
}

#[axum::debug_handler]
pub async fn create_time_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateTimeSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), AppError> {
    let Json(payload) = payload?;
    let slot = state.services.time_slots.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}
