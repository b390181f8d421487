//! # Field Schedule Handlers
//!
//! Thin adapters between HTTP and the schedule services. Bodies and query
//! strings that fail to deserialize are answered with `400` before any
//! service is called.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use fieldbook_core::{
    models::field_schedule::{
        CreateFieldScheduleRequest, CreateFieldScheduleResponse, FieldScheduleForBookingResponse,
        FieldScheduleResponse, GenerateFieldScheduleRequest, UpdateFieldScheduleRequest,
        UpdateStatusFieldScheduleRequest,
    },
    pagination::{Paginated, PaginationParams},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query string of the booking grid endpoint
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

pub async fn list_field_schedules(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Paginated<FieldScheduleResponse>>, AppError> {
    let Query(params) = query?;
    Ok(Json(state.services.schedules.get_all_paginated(&params).await?))
}

/// Booking grid of one field for one day.
///
/// ```text
/// GET /api/v1/field/schedule/lists/:uuid?date=2024-06-01
/// ```
pub async fn list_for_booking(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<FieldScheduleForBookingResponse>>, AppError> {
    let Path(field_uuid) = path?;
    let Query(DateQuery { date }) = query?;
    let grid = state
        .services
        .schedules
        .get_all_by_field_and_date(field_uuid, date)
        .await?;
    Ok(Json(grid))
}

pub async fn get_field_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FieldScheduleResponse>, AppError> {
    let Path(uuid) = path?;
    Ok(Json(state.services.schedules.get_by_uuid(uuid).await?))
}

#[axum::debug_handler]
pub async fn create_field_schedule(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateFieldScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateFieldScheduleResponse>), AppError> {
    let Json(payload) = payload?;
    let created = state.services.schedules.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(CreateFieldScheduleResponse { created })))
}

#[axum::debug_handler]
pub async fn generate_one_month(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<GenerateFieldScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateFieldScheduleResponse>), AppError> {
    let Json(payload) = payload?;
    let created = state
        .services
        .schedules
        .generate_for_one_month(payload.field_id)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateFieldScheduleResponse { created })))
}

#[axum::debug_handler]
pub async fn update_field_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateFieldScheduleRequest>, JsonRejection>,
) -> Result<Json<FieldScheduleResponse>, AppError> {
    let Path(uuid) = path?;
    let Json(payload) = payload?;
    Ok(Json(state.services.schedules.update(uuid, &payload).await?))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<UpdateStatusFieldScheduleRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    state.services.schedules.update_status(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_field_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(uuid) = path?;
    state.services.schedules.delete(uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
