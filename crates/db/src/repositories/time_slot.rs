use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use fieldbook_core::{
    errors::{BookingError, BookingResult},
    models::time_slot::TimeSlot,
    store::TimeSlotStore,
};
use uuid::Uuid;

use crate::{DbPool, errors::db_error, models::DbTimeSlot};

#[derive(Clone)]
pub struct PgTimeSlotRepository {
    pool: DbPool,
}

impl PgTimeSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeSlotStore for PgTimeSlotRepository {
    async fn find_all(&self) -> BookingResult<Vec<TimeSlot>> {
        let rows = sqlx::query_as::<_, DbTimeSlot>(
            r#"
            SELECT id, uuid, start_time, end_time, created_at, updated_at
            FROM times
            ORDER BY start_time ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeSlot> {
        sqlx::query_as::<_, DbTimeSlot>(
            r#"
            SELECT id, uuid, start_time, end_time, created_at, updated_at
            FROM times
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(TimeSlot::from)
        .ok_or(BookingError::TimeNotFound(uuid))
    }

    async fn create(&self, start_time: NaiveTime, end_time: NaiveTime) -> BookingResult<TimeSlot> {
        let uuid = Uuid::new_v4();
        let now = Utc::now();

        let row = sqlx::query_as::<_, DbTimeSlot>(
            r#"
            INSERT INTO times (uuid, start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, uuid, start_time, end_time, created_at, updated_at
            "#,
        )
        .bind(uuid)
        .bind(start_time)
        .bind(end_time)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }
}
