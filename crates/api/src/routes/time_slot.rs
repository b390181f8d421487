use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::time_slot};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/time",
            get(time_slot::list_time_slots).post(time_slot::create_time_slot),
        )
        .route("/time/:uuid", get(time_slot::get_time_slot))
}
