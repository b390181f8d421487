use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::field::{CreateFieldRequest, FieldData, FieldResponse, ImageUpload, UpdateFieldRequest},
    pagination::{PageQuery, Paginated, PaginationParams, paginate},
    store::{FIELD_SORT_COLUMNS, FieldStore, ObjectStorage},
};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Object key for an uploaded image: `images/<timestamp>-<uuid><.ext>`.
///
/// The client file name only contributes its extension, so it can never
/// escape the `images/` prefix.
pub fn image_path(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!(
        "images/{}-{}{}",
        Utc::now().format("%Y%m%d%H%M%S"),
        Uuid::new_v4(),
        extension
    )
}

fn validate_attributes(name: &str, code: &str, price_per_hour: i32) -> BookingResult<()> {
    if name.trim().is_empty() {
        return Err(BookingError::validation("name is required"));
    }
    if code.trim().is_empty() {
        return Err(BookingError::validation("code is required"));
    }
    if price_per_hour <= 0 {
        return Err(BookingError::validation("pricePerHour must be positive"));
    }
    Ok(())
}

fn validate_images(images: &[ImageUpload]) -> BookingResult<()> {
    if images.is_empty() {
        return Err(BookingError::validation("at least one image is required"));
    }
    if let Some(image) = images.iter().find(|image| image.bytes.len() > MAX_IMAGE_BYTES) {
        return Err(BookingError::Validation(format!(
            "image {} is larger than 5 MiB",
            image.filename
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct FieldService {
    fields: Arc<dyn FieldStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl FieldService {
    pub fn new(fields: Arc<dyn FieldStore>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { fields, storage }
    }

    pub async fn get_all(&self) -> BookingResult<Vec<FieldResponse>> {
        let fields = self.fields.find_all().await?;
        Ok(fields.into_iter().map(FieldResponse::from).collect())
    }

    pub async fn get_all_paginated(
        &self,
        params: &PaginationParams,
    ) -> BookingResult<Paginated<FieldResponse>> {
        let query = PageQuery::new(params, FIELD_SORT_COLUMNS)?;
        let (fields, total) = self.fields.find_all_paginated(&query).await?;
        let data = fields.into_iter().map(FieldResponse::from).collect();
        Ok(paginate(&query, total, data))
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldResponse> {
        Ok(self.fields.find_by_uuid(uuid).await?.into())
    }

    async fn upload_images(&self, images: Vec<ImageUpload>) -> BookingResult<Vec<String>> {
        validate_images(&images)?;

        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            let path = image_path(&image.filename);
            let url = self.storage.upload(&path, image.bytes).await.map_err(|e| {
                error!("Uploading {} failed: {}", image.filename, e);
                e
            })?;
            urls.push(url);
        }
        Ok(urls)
    }

    pub async fn create(&self, request: CreateFieldRequest) -> BookingResult<FieldResponse> {
        validate_attributes(&request.name, &request.code, request.price_per_hour)?;
        let images = self.upload_images(request.images).await?;

        let field = self
            .fields
            .create(FieldData {
                name: request.name,
                code: request.code,
                price_per_hour: request.price_per_hour,
                images,
            })
            .await?;
        info!("Created field {} ({})", field.uuid, field.code);
        Ok(field.into())
    }

    /// Updates a field. New images replace the stored list; without new
    /// images the stored list is kept.
    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateFieldRequest,
    ) -> BookingResult<FieldResponse> {
        validate_attributes(&request.name, &request.code, request.price_per_hour)?;
        let current = self.fields.find_by_uuid(uuid).await?;

        let images = if request.images.is_empty() {
            current.images
        } else {
            self.upload_images(request.images).await?
        };

        let field = self
            .fields
            .update(
                uuid,
                FieldData {
                    name: request.name,
                    code: request.code,
                    price_per_hour: request.price_per_hour,
                    images,
                },
            )
            .await?;
        info!("Updated field {}", field.uuid);
        Ok(field.into())
    }

    pub async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        self.fields.find_by_uuid(uuid).await?;
        self.fields.delete(uuid).await?;
        info!("Deleted field {}", uuid);
        Ok(())
    }
}
