use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::field_schedule};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/field/schedule",
            get(field_schedule::list_field_schedules).post(field_schedule::create_field_schedule),
        )
        .route(
            "/field/schedule/one-month",
            post(field_schedule::generate_one_month),
        )
        .route("/field/schedule/status", patch(field_schedule::update_status))
        .route(
            "/field/schedule/lists/:uuid",
            get(field_schedule::list_for_booking),
        )
        .route(
            "/field/schedule/:uuid",
            get(field_schedule::get_field_schedule)
                .put(field_schedule::update_field_schedule)
                .delete(field_schedule::delete_field_schedule),
        )
}
