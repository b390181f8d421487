/// Field catalog endpoints
pub mod field;
/// Field schedule endpoints
pub mod field_schedule;
/// Liveness and version endpoints
pub mod health;
/// Time slot catalog endpoints
pub mod time_slot;

use axum::Router;
use std::sync::Arc;

use crate::ApiState;

/// Prefix of every versioned endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// All versioned endpoints, to be nested under [`API_PREFIX`].
pub fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .merge(field_schedule::routes())
        .merge(field::routes())
        .merge(time_slot::routes())
}
