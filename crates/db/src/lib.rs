//! PostgreSQL storage for fields, time slots and field schedules.

pub mod errors;
pub mod models;
pub mod repositories;
pub mod schema;

#[cfg(test)]
pub mod testing;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use repositories::{
    field::PgFieldRepository, field_schedule::PgFieldScheduleRepository,
    time_slot::PgTimeSlotRepository,
};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
