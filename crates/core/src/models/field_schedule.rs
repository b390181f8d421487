use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::ScheduleStatus;

/// One field bound to one time slot on one calendar day.
///
/// Reads come back joined with the field and the time slot so callers can
/// render prices and time ranges without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchedule {
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
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert. `(field_id, date, time_id)` must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFieldSchedule {
    pub uuid: Uuid,
    pub field_id: i32,
    pub time_id: i32,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
}

impl NewFieldSchedule {
    pub fn available(field_id: i32, time_id: i32, date: NaiveDate) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            field_id,
            time_id,
            date,
            status: ScheduleStatus::Available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFieldScheduleRequest {
    #[serde(rename = "fieldID")]
    pub field_id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "timeIDs", default)]
    pub time_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFieldScheduleRequest {
    #[serde(rename = "fieldID")]
    pub field_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFieldScheduleRequest {
    pub date: NaiveDate,
    #[serde(rename = "timeID")]
    pub time_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusFieldScheduleRequest {
    #[serde(rename = "fieldScheduleIDs", default)]
    pub field_schedule_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFieldScheduleResponse {
    pub created: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldScheduleResponse {
    pub uuid: Uuid,
    pub field_name: String,
    pub date: NaiveDate,
    pub price_per_hour: i32,
    pub status: ScheduleStatus,
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FieldSchedule> for FieldScheduleResponse {
    fn from(schedule: FieldSchedule) -> Self {
        Self {
            uuid: schedule.uuid,
            time: format!(
                "{} - {}",
                schedule.start_time.format("%H:%M:%S"),
                schedule.end_time.format("%H:%M:%S")
            ),
            field_name: schedule.field_name,
            date: schedule.date,
            price_per_hour: schedule.price_per_hour,
            status: schedule.status,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

/// Customer-facing row of the daily booking grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldScheduleForBookingResponse {
    pub uuid: Uuid,
    pub price_per_hour: String,
    pub date: String,
    pub status: ScheduleStatus,
    pub time: String,
}
