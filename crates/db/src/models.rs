use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use fieldbook_core::{
    errors::BookingError,
    models::{field::Field, field_schedule::FieldSchedule, status::ScheduleStatus, time_slot::TimeSlot},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbField {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub code: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbField> for Field {
    fn from(row: DbField) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            name: row.name,
            code: row.code,
            price_per_hour: row.price_per_hour,
            images: row.images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: i32,
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A `field_schedules` row joined with its field and time slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFieldSchedule {
    pub id: i32,
    pub uuid: Uuid,
    pub field_id: i32,
    pub field_uuid: Uuid,
    pub field_name: String,
    pub price_per_hour: i32,
    pub time_id: i32,
    pub time_uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbFieldSchedule> for FieldSchedule {
    type Error = BookingError;

    fn try_from(row: DbFieldSchedule) -> Result<Self, Self::Error> {
        let status = ScheduleStatus::from_code(row.status).ok_or_else(|| {
            eyre!("schedule {} has unknown status code {}", row.uuid, row.status)
        })?;

        Ok(Self {
            id: row.id,
            uuid: row.uuid,
            field_id: row.field_id,
            field_uuid: row.field_uuid,
            field_name: row.field_name,
            price_per_hour: row.price_per_hour,
            time_id: row.time_id,
            time_uuid: row.time_uuid,
            start_time: row.start_time,
            end_time: row.end_time,
            date: row.date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
