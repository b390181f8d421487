//! # Storage contracts
//!
//! Capability traits the services depend on. `fieldbook-db` implements them
//! on PostgreSQL, [`crate::memory`] implements them in memory, and
//! [`crate::mock`] provides mockall doubles for fault injection.
//!
//! Lookups by UUID fail with the matching `*NotFound` error. Lookups that
//! are used as existence checks return `Option` instead, so a missing row is
//! never confused with a storage failure.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        field::{Field, FieldData},
        field_schedule::{FieldSchedule, NewFieldSchedule},
        status::ScheduleStatus,
        time_slot::TimeSlot,
    },
    pagination::PageQuery,
};

/// Columns a field list may be sorted by.
pub const FIELD_SORT_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "name",
    "code",
    "price_per_hour",
];

/// Columns a field schedule list may be sorted by.
pub const FIELD_SCHEDULE_SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "date", "status"];

#[async_trait]
pub trait FieldStore: Send + Sync {
    async fn find_all(&self) -> BookingResult<Vec<Field>>;

    /// One page of fields plus the total number of fields.
    async fn find_all_paginated(&self, query: &PageQuery) -> BookingResult<(Vec<Field>, i64)>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<Field>;

    async fn create(&self, data: FieldData) -> BookingResult<Field>;

    async fn update(&self, uuid: Uuid, data: FieldData) -> BookingResult<Field>;

    /// Fails with `FieldHasSchedules` while schedules still reference the field.
    async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
}

#[async_trait]
pub trait TimeSlotStore: Send + Sync {
    /// Every time slot, ordered by start time.
    async fn find_all(&self) -> BookingResult<Vec<TimeSlot>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeSlot>;

    async fn create(&self, start_time: NaiveTime, end_time: NaiveTime) -> BookingResult<TimeSlot>;
}

#[async_trait]
pub trait FieldScheduleStore: Send + Sync {
    /// One page of schedules plus the total number of schedules.
    async fn find_all_paginated(
        &self,
        query: &PageQuery,
    ) -> BookingResult<(Vec<FieldSchedule>, i64)>;

    /// Schedules of one field on one day, ordered by slot start time.
    async fn find_all_by_field_and_date(
        &self,
        field_id: i32,
        date: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>>;

    /// Schedules of one field with `from <= date <= to`.
    async fn find_all_by_field_and_date_range(
        &self,
        field_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldSchedule>;

    /// Exact `(field, date, slot)` match, used as the conflict check.
    async fn find_by_date_and_slot(
        &self,
        date: NaiveDate,
        time_id: i32,
        field_id: i32,
    ) -> BookingResult<Option<FieldSchedule>>;

    /// Inserts every row or none. A duplicate `(field, date, slot)` fails
    /// with `ScheduleAlreadyExists`.
    async fn create_batch(&self, schedules: &[NewFieldSchedule]) -> BookingResult<u64>;

    /// Moves a schedule to another date and slot.
    async fn update(&self, uuid: Uuid, date: NaiveDate, time_id: i32)
    -> BookingResult<FieldSchedule>;

    async fn update_status(&self, status: ScheduleStatus, uuid: Uuid) -> BookingResult<()>;

    /// Sets `status` on every listed schedule or on none of them.
    async fn update_status_batch(&self, status: ScheduleStatus, uuids: &[Uuid])
    -> BookingResult<u64>;

    async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
}

/// Blob storage for field images.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `path` and returns the public URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> BookingResult<String>;
}
