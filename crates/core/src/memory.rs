//! In-memory implementation of the storage contracts.
//!
//! Enforces the same rules as the PostgreSQL schema: unique
//! `(field, date, slot)`, foreign keys from schedules to fields and slots,
//! and all-or-nothing batches. Every batch runs under one write lock.

use std::cmp::Ordering;
use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        field::{Field, FieldData},
        field_schedule::{FieldSchedule, NewFieldSchedule},
        status::ScheduleStatus,
        time_slot::TimeSlot,
    },
    pagination::{PageQuery, SortOrder},
    store::{FieldScheduleStore, FieldStore, TimeSlotStore},
};

#[derive(Debug, Clone)]
struct ScheduleRow {
    id: i32,
    uuid: Uuid,
    field_id: i32,
    time_id: i32,
    date: NaiveDate,
    status: ScheduleStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    fields: Vec<Field>,
    time_slots: Vec<TimeSlot>,
    schedules: Vec<ScheduleRow>,
    last_field_id: i32,
    last_time_id: i32,
    last_schedule_id: i32,
}

impl Tables {
    fn join(&self, row: &ScheduleRow) -> BookingResult<FieldSchedule> {
        let field = self
            .fields
            .iter()
            .find(|f| f.id == row.field_id)
            .ok_or_else(|| eyre!("schedule {} references missing field {}", row.uuid, row.field_id))?;
        let slot = self
            .time_slots
            .iter()
            .find(|t| t.id == row.time_id)
            .ok_or_else(|| eyre!("schedule {} references missing time {}", row.uuid, row.time_id))?;

        Ok(FieldSchedule {
            id: row.id,
            uuid: row.uuid,
            field_id: field.id,
            field_uuid: field.uuid,
            field_name: field.name.clone(),
            price_per_hour: field.price_per_hour,
            time_id: slot.id,
            time_uuid: slot.uuid,
            start_time: slot.start_time,
            end_time: slot.end_time,
            date: row.date,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn join_all<'a>(
        &self,
        rows: impl IntoIterator<Item = &'a ScheduleRow>,
    ) -> BookingResult<Vec<FieldSchedule>> {
        rows.into_iter().map(|row| self.join(row)).collect()
    }

    fn start_time_of(&self, time_id: i32) -> Option<NaiveTime> {
        self.time_slots
            .iter()
            .find(|t| t.id == time_id)
            .map(|t| t.start_time)
    }

    fn occupied(&self, field_id: i32, date: NaiveDate, time_id: i32, except: Option<Uuid>) -> bool {
        self.schedules.iter().any(|s| {
            s.field_id == field_id
                && s.date == date
                && s.time_id == time_id
                && Some(s.uuid) != except
        })
    }
}

fn ordered(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn page_bounds(query: &PageQuery, len: usize) -> (usize, usize) {
    let start = usize::try_from(query.offset()).unwrap_or(usize::MAX).min(len);
    let end = start.saturating_add(query.limit as usize).min(len);
    (start, end)
}

/// Process-local store backing all three catalogs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schedule rows currently stored.
    pub async fn schedule_count(&self) -> usize {
        self.tables.read().await.schedules.len()
    }
}

#[async_trait]
impl FieldStore for InMemoryStore {
    async fn find_all(&self) -> BookingResult<Vec<Field>> {
        Ok(self.tables.read().await.fields.clone())
    }

    async fn find_all_paginated(&self, query: &PageQuery) -> BookingResult<(Vec<Field>, i64)> {
        let tables = self.tables.read().await;
        let mut fields = tables.fields.clone();
        fields.sort_by(|a, b| {
            let ordering = match query.sort_column {
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                "name" => a.name.cmp(&b.name),
                "code" => a.code.cmp(&b.code),
                "price_per_hour" => a.price_per_hour.cmp(&b.price_per_hour),
                _ => a.created_at.cmp(&b.created_at),
            };
            ordered(ordering.then(a.id.cmp(&b.id)), query.sort_order)
        });

        let total = fields.len() as i64;
        let (start, end) = page_bounds(query, fields.len());
        Ok((fields[start..end].to_vec(), total))
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<Field> {
        self.tables
            .read()
            .await
            .fields
            .iter()
            .find(|f| f.uuid == uuid)
            .cloned()
            .ok_or(BookingError::FieldNotFound(uuid))
    }

    async fn create(&self, data: FieldData) -> BookingResult<Field> {
        let mut tables = self.tables.write().await;
        tables.last_field_id += 1;
        let now = Utc::now();
        let field = Field {
            id: tables.last_field_id,
            uuid: Uuid::new_v4(),
            name: data.name,
            code: data.code,
            price_per_hour: data.price_per_hour,
            images: data.images,
            created_at: now,
            updated_at: now,
        };
        tables.fields.push(field.clone());
        Ok(field)
    }

    async fn update(&self, uuid: Uuid, data: FieldData) -> BookingResult<Field> {
        let mut tables = self.tables.write().await;
        let field = tables
            .fields
            .iter_mut()
            .find(|f| f.uuid == uuid)
            .ok_or(BookingError::FieldNotFound(uuid))?;
        field.name = data.name;
        field.code = data.code;
        field.price_per_hour = data.price_per_hour;
        field.images = data.images;
        field.updated_at = Utc::now();
        Ok(field.clone())
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        let position = tables
            .fields
            .iter()
            .position(|f| f.uuid == uuid)
            .ok_or(BookingError::FieldNotFound(uuid))?;
        let field_id = tables.fields[position].id;
        if tables.schedules.iter().any(|s| s.field_id == field_id) {
            return Err(BookingError::FieldHasSchedules(uuid));
        }
        tables.fields.remove(position);
        Ok(())
    }
}

#[async_trait]
impl TimeSlotStore for InMemoryStore {
    async fn find_all(&self) -> BookingResult<Vec<TimeSlot>> {
        let mut slots = self.tables.read().await.time_slots.clone();
        slots.sort_by_key(|t| (t.start_time, t.id));
        Ok(slots)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeSlot> {
        self.tables
            .read()
            .await
            .time_slots
            .iter()
            .find(|t| t.uuid == uuid)
            .cloned()
            .ok_or(BookingError::TimeNotFound(uuid))
    }

    async fn create(&self, start_time: NaiveTime, end_time: NaiveTime) -> BookingResult<TimeSlot> {
        if end_time <= start_time {
            return Err(eyre!("time slot violates valid_time_range").into());
        }

        let mut tables = self.tables.write().await;
        tables.last_time_id += 1;
        let now = Utc::now();
        let slot = TimeSlot {
            id: tables.last_time_id,
            uuid: Uuid::new_v4(),
            start_time,
            end_time,
            created_at: now,
            updated_at: now,
        };
        tables.time_slots.push(slot.clone());
        Ok(slot)
    }
}

#[async_trait]
impl FieldScheduleStore for InMemoryStore {
    async fn find_all_paginated(
        &self,
        query: &PageQuery,
    ) -> BookingResult<(Vec<FieldSchedule>, i64)> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&ScheduleRow> = tables.schedules.iter().collect();
        rows.sort_by(|a, b| {
            let ordering = match query.sort_column {
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                "date" => a.date.cmp(&b.date),
                "status" => a.status.code().cmp(&b.status.code()),
                _ => a.created_at.cmp(&b.created_at),
            };
            ordered(ordering.then(a.id.cmp(&b.id)), query.sort_order)
        });

        let total = rows.len() as i64;
        let (start, end) = page_bounds(query, rows.len());
        Ok((tables.join_all(rows[start..end].iter().copied())?, total))
    }

    async fn find_all_by_field_and_date(
        &self,
        field_id: i32,
        date: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&ScheduleRow> = tables
            .schedules
            .iter()
            .filter(|s| s.field_id == field_id && s.date == date)
            .collect();
        rows.sort_by_key(|s| tables.start_time_of(s.time_id));
        tables.join_all(rows)
    }

    async fn find_all_by_field_and_date_range(
        &self,
        field_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<FieldSchedule>> {
        let tables = self.tables.read().await;
        tables.join_all(
            tables
                .schedules
                .iter()
                .filter(|s| s.field_id == field_id && s.date >= from && s.date <= to),
        )
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldSchedule> {
        let tables = self.tables.read().await;
        let row = tables
            .schedules
            .iter()
            .find(|s| s.uuid == uuid)
            .ok_or(BookingError::ScheduleNotFound(uuid))?;
        tables.join(row)
    }

    async fn find_by_date_and_slot(
        &self,
        date: NaiveDate,
        time_id: i32,
        field_id: i32,
    ) -> BookingResult<Option<FieldSchedule>> {
        let tables = self.tables.read().await;
        tables
            .schedules
            .iter()
            .find(|s| s.field_id == field_id && s.date == date && s.time_id == time_id)
            .map(|row| tables.join(row))
            .transpose()
    }

    async fn create_batch(&self, schedules: &[NewFieldSchedule]) -> BookingResult<u64> {
        let mut tables = self.tables.write().await;

        let mut seen = HashSet::with_capacity(schedules.len());
        for new in schedules {
            if !tables.fields.iter().any(|f| f.id == new.field_id) {
                return Err(eyre!("field id {} does not exist", new.field_id).into());
            }
            if !tables.time_slots.iter().any(|t| t.id == new.time_id) {
                return Err(eyre!("time slot id {} does not exist", new.time_id).into());
            }
            if tables.occupied(new.field_id, new.date, new.time_id, None)
                || !seen.insert((new.field_id, new.date, new.time_id))
            {
                return Err(BookingError::ScheduleAlreadyExists);
            }
        }

        let now = Utc::now();
        for new in schedules {
            tables.last_schedule_id += 1;
            let id = tables.last_schedule_id;
            tables.schedules.push(ScheduleRow {
                id,
                uuid: new.uuid,
                field_id: new.field_id,
                time_id: new.time_id,
                date: new.date,
                status: new.status,
                created_at: now,
                updated_at: now,
            });
        }

        Ok(schedules.len() as u64)
    }

    async fn update(
        &self,
        uuid: Uuid,
        date: NaiveDate,
        time_id: i32,
    ) -> BookingResult<FieldSchedule> {
        let mut tables = self.tables.write().await;
        let field_id = tables
            .schedules
            .iter()
            .find(|s| s.uuid == uuid)
            .map(|s| s.field_id)
            .ok_or(BookingError::ScheduleNotFound(uuid))?;
        if tables.start_time_of(time_id).is_none() {
            return Err(eyre!("time slot id {time_id} does not exist").into());
        }
        if tables.occupied(field_id, date, time_id, Some(uuid)) {
            return Err(BookingError::ScheduleAlreadyExists);
        }

        let row = tables
            .schedules
            .iter_mut()
            .find(|s| s.uuid == uuid)
            .ok_or(BookingError::ScheduleNotFound(uuid))?;
        row.date = date;
        row.time_id = time_id;
        row.updated_at = Utc::now();
        let row = row.clone();
        tables.join(&row)
    }

    async fn update_status(&self, status: ScheduleStatus, uuid: Uuid) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .schedules
            .iter_mut()
            .find(|s| s.uuid == uuid)
            .ok_or(BookingError::ScheduleNotFound(uuid))?;
        row.status = status;
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn update_status_batch(
        &self,
        status: ScheduleStatus,
        uuids: &[Uuid],
    ) -> BookingResult<u64> {
        let mut tables = self.tables.write().await;
        if let Some(missing) = uuids
            .iter()
            .find(|uuid| !tables.schedules.iter().any(|s| s.uuid == **uuid))
        {
            return Err(BookingError::ScheduleNotFound(*missing));
        }

        let now = Utc::now();
        let mut updated = 0;
        for row in tables.schedules.iter_mut().filter(|s| uuids.contains(&s.uuid)) {
            row.status = status;
            row.updated_at = now;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.schedules.len();
        tables.schedules.retain(|s| s.uuid != uuid);
        if tables.schedules.len() == before {
            return Err(BookingError::ScheduleNotFound(uuid));
        }
        Ok(())
    }
}
