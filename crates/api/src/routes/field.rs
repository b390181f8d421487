use axum::{Router, extract::DefaultBodyLimit, routing::get};
use fieldbook_core::services::field::MAX_IMAGE_BYTES;
use std::sync::Arc;

use crate::{ApiState, handlers::field};

/// Body limit for field forms: a handful of full-size images plus the text parts.
pub const MAX_FIELD_FORM_BYTES: usize = 8 * MAX_IMAGE_BYTES;

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/field", get(field::list_fields).post(field::create_field))
        .route("/field/pagination", get(field::list_fields_paginated))
        .route(
            "/field/:uuid",
            get(field::get_field)
                .put(field::update_field)
                .delete(field::delete_field),
        )
        .layer(DefaultBodyLimit::max(MAX_FIELD_FORM_BYTES))
}
