//! # Field Handlers
//!
//! Fields are created and updated with `multipart/form-data` bodies carrying
//! `name`, `code`, `pricePerHour` and any number of `images` file parts.

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use fieldbook_core::{
    errors::BookingError,
    models::field::{CreateFieldRequest, FieldResponse, ImageUpload, UpdateFieldRequest},
    pagination::{Paginated, PaginationParams},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Fields of a field multipart form, before validation.
#[derive(Debug, Default)]
pub struct FieldForm {
    pub name: Option<String>,
    pub code: Option<String>,
    pub price_per_hour: Option<String>,
    pub images: Vec<ImageUpload>,
}

impl FieldForm {
    pub async fn from_multipart(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, AppError> {
        let mut multipart = multipart?;
        let mut form = Self::default();

        while let Some(part) = multipart.next_field().await? {
            let name = part.name().unwrap_or_default().to_string();
            match name.as_str() {
                "name" => form.name = Some(part.text().await?),
                "code" => form.code = Some(part.text().await?),
                "pricePerHour" => form.price_per_hour = Some(part.text().await?),
                "images" => {
                    let filename = part.file_name().unwrap_or_default().to_string();
                    let bytes = part.bytes().await?;
                    form.images.push(ImageUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                other => tracing::debug!("Ignoring unknown form part '{}'", other),
            }
        }

        Ok(form)
    }

    /// Splits the form into `(name, code, price_per_hour, images)`.
    fn into_parts(self) -> Result<(String, String, i32, Vec<ImageUpload>), BookingError> {
        let name = self
            .name
            .ok_or_else(|| BookingError::validation("name is required"))?;
        let code = self
            .code
            .ok_or_else(|| BookingError::validation("code is required"))?;
        let price = self
            .price_per_hour
            .ok_or_else(|| BookingError::validation("pricePerHour is required"))?;
        let price_per_hour = price.trim().parse::<i32>().map_err(|_| {
            BookingError::Validation(format!("pricePerHour must be a whole number, got '{price}'"))
        })?;

        Ok((name, code, price_per_hour, self.images))
    }
}

impl TryFrom<FieldForm> for CreateFieldRequest {
    type Error = BookingError;

    fn try_from(form: FieldForm) -> Result<Self, Self::Error> {
        let (name, code, price_per_hour, images) = form.into_parts()?;
        Ok(Self {
            name,
            code,
            price_per_hour,
            images,
        })
    }
}

impl TryFrom<FieldForm> for UpdateFieldRequest {
    type Error = BookingError;

    fn try_from(form: FieldForm) -> Result<Self, Self::Error> {
        let (name, code, price_per_hour, images) = form.into_parts()?;
        Ok(Self {
            name,
            code,
            price_per_hour,
            images,
        })
    }
}

pub async fn list_fields(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<FieldResponse>>, AppError> {
    Ok(Json(state.services.fields.get_all().await?))
}

pub async fn list_fields_paginated(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Paginated<FieldResponse>>, AppError> {
    let Query(params) = query?;
    Ok(Json(state.services.fields.get_all_paginated(&params).await?))
}

pub async fn get_field(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FieldResponse>, AppError> {
    let Path(uuid) = path?;
    Ok(Json(state.services.fields.get_by_uuid(uuid).await?))
}

pub async fn create_field(
    State(state): State<Arc<ApiState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FieldResponse>), AppError> {
    let request = CreateFieldRequest::try_from(FieldForm::from_multipart(multipart).await?)?;
    let field = state.services.fields.create(request).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

pub async fn update_field(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FieldResponse>, AppError> {
    let Path(uuid) = path?;
    let request = UpdateFieldRequest::try_from(FieldForm::from_multipart(multipart).await?)?;
    Ok(Json(state.services.fields.update(uuid, request).await?))
}

pub async fn delete_field(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(uuid) = path?;
    state.services.fields.delete(uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
