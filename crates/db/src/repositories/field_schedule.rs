use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use fieldbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        field_schedule::{FieldSchedule, NewFieldSchedule},
        status::ScheduleStatus,
    },
    pagination::PageQuery,
    store::FieldScheduleStore,
};
use uuid::Uuid;

use crate::{
    DbPool,
    errors::{db_error, schedule_write_error},
    models::DbFieldSchedule,
};

const SCHEDULE_SELECT: &str = r#"
    SELECT fs.id, fs.uuid, fs.field_id, f.uuid AS field_uuid, f.name AS field_name,
           f.price_per_hour, fs.time_id, t.uuid AS time_uuid, t.start_time, t.end_time,
           fs.date, fs.status, fs.created_at, fs.updated_at
    FROM field_schedules fs
    JOIN fields f ON f.id = fs.field_id
    JOIN times t ON t.id = fs.time_id
"#;

fn into_schedules(rows: Vec<DbFieldSchedule>) -> BookingResult<Vec<FieldSchedule>> {
    rows.into_iter().map(FieldSchedule::try_from).collect()
}

#[derive(Clone)]
pub struct PgFieldScheduleRepository {
    pool: DbPool,
}

impl PgFieldScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldScheduleStore for PgFieldScheduleRepository {
    async fn find_all_paginated(
        &self,
        query: &PageQuery,
    ) -> BookingResult<(Vec<FieldSchedule>, i64)> {
        // sort_column comes from a fixed whitelist
        let sql = format!(
            "{SCHEDULE_SELECT} ORDER BY fs.{} {}, fs.id {} LIMIT $1 OFFSET $2",
            query.sort_column,
            query.sort_order.as_sql(),
            query.sort_order.as_sql(),
        );
        tracing::debug!(
            "Listing field schedules: page={}, limit={}, sort={} {}",
            query.page,
            query.limit,
            query.sort_column,
            query.sort_order.as_sql()
        );

        let rows = sqlx::query_as::<_, DbFieldSchedule>(&sql)
            .bind(i64::from(query.limit))
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM field_schedules")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok((into_schedules(rows)?, total))
    }

    async fn find_all_by_field_and_date(
        &self,
        field_id: i32,
        date: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>> {
        let sql = format!(
            "{SCHEDULE_SELECT} WHERE fs.field_id = $1 AND fs.date = $2 ORDER BY t.start_time ASC"
        );
        let rows = sqlx::query_as::<_, DbFieldSchedule>(&sql)
            .bind(field_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        into_schedules(rows)
    }

    async fn find_all_by_field_and_date_range(
        &self,
        field_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>> {
        let sql = format!(
            "{SCHEDULE_SELECT} WHERE fs.field_id = $1 AND fs.date BETWEEN $2 AND $3 \
             ORDER BY fs.date ASC, t.start_time ASC"
        );
        let rows = sqlx::query_as::<_, DbFieldSchedule>(&sql)
            .bind(field_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        into_schedules(rows)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldSchedule> {
        let sql = format!("{SCHEDULE_SELECT} WHERE fs.uuid = $1");
        let row = sqlx::query_as::<_, DbFieldSchedule>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::ScheduleNotFound(uuid))?;

        row.try_into()
    }

    async fn find_by_date_and_slot(
        &self,
        date: NaiveDate,
        time_id: i32,
        field_id: i32,
    ) -> BookingResult<Option<FieldSchedule>> {
        let sql = format!(
            "{SCHEDULE_SELECT} WHERE fs.date = $1 AND fs.time_id = $2 AND fs.field_id = $3"
        );
        sqlx::query_as::<_, DbFieldSchedule>(&sql)
            .bind(date)
            .bind(time_id)
            .bind(field_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .map(FieldSchedule::try_from)
            .transpose()
    }

    async fn create_batch(&self, schedules: &[NewFieldSchedule]) -> BookingResult<u64> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for schedule in schedules {
            sqlx::query(
                r#"
                INSERT INTO field_schedules (uuid, field_id, time_id, date, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                "#,
            )
            .bind(schedule.uuid)
            .bind(schedule.field_id)
            .bind(schedule.time_id)
            .bind(schedule.date)
            .bind(schedule.status.code())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(schedule_write_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        tracing::debug!("Inserted {} field schedules", schedules.len());
        Ok(schedules.len() as u64)
    }

    async fn update(
        &self,
        uuid: Uuid,
        date: NaiveDate,
        time_id: i32,
    ) -> BookingResult<FieldSchedule> {
        let result = sqlx::query(
            r#"
            UPDATE field_schedules
            SET date = $2, time_id = $3, updated_at = NOW()
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .bind(date)
        .bind(time_id)
        .execute(&self.pool)
        .await
        .map_err(schedule_write_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::ScheduleNotFound(uuid));
        }
        self.find_by_uuid(uuid).await
    }

    async fn update_status(&self, status: ScheduleStatus, uuid: Uuid) -> BookingResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE field_schedules
            SET status = $1, updated_at = NOW()
            WHERE uuid = $2
            "#,
        )
        .bind(status.code())
        .bind(uuid)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::ScheduleNotFound(uuid));
        }
        Ok(())
    }

    async fn update_status_batch(
        &self,
        status: ScheduleStatus,
        uuids: &[Uuid],
    ) -> BookingResult<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut updated = 0;

        for uuid in uuids {
            let result = sqlx::query(
                r#"
                UPDATE field_schedules
                SET status = $1, updated_at = NOW()
                WHERE uuid = $2
                "#,
            )
            .bind(status.code())
            .bind(uuid)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

            // Dropping the transaction rolls back the rows already updated.
            if result.rows_affected() == 0 {
                return Err(BookingError::ScheduleNotFound(*uuid));
            }
            updated += result.rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        Ok(updated)
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        let result = sqlx::query("DELETE FROM field_schedules WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::ScheduleNotFound(uuid));
        }
        Ok(())
    }
}
