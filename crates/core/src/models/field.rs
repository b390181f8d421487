use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable court or pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub code: String,
    /// Price in the smallest currency unit
    pub price_per_hour: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field attributes written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    pub name: String,
    pub code: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
}

/// An uploaded image file, before it is sent to object storage.
#[derive(Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CreateFieldRequest {
    pub name: String,
    pub code: String,
    pub price_per_hour: i32,
    pub images: Vec<ImageUpload>,
}

/// An empty `images` list keeps the images the field already has.
#[derive(Debug, Clone)]
pub struct UpdateFieldRequest {
    pub name: String,
    pub code: String,
    pub price_per_hour: i32,
    pub images: Vec<ImageUpload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub uuid: Uuid,
    pub name: String,
    pub code: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            uuid: field.uuid,
            name: field.name,
            code: field.code,
            price_per_hour: field.price_per_hour,
            images: field.images,
            created_at: field.created_at,
            updated_at: field.updated_at,
        }
    }
}
