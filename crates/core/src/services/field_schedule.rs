//! Schedule lifecycle: reads, moves, bookings and deletes.
//!
//! A schedule starts `Available` and can only be moved to `Booked`. Moving a
//! schedule to another date or slot is allowed in either state.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    format::{date_label, format_rupiah, time_range_label},
    models::{
        field_schedule::{
            CreateFieldScheduleRequest, FieldScheduleForBookingResponse, FieldScheduleResponse,
            UpdateFieldScheduleRequest, UpdateStatusFieldScheduleRequest,
        },
        status::ScheduleStatus,
    },
    pagination::{PageQuery, Paginated, PaginationParams, paginate},
    services::generator::ScheduleGenerator,
    store::{FIELD_SCHEDULE_SORT_COLUMNS, FieldScheduleStore, FieldStore, TimeSlotStore},
};

#[derive(Clone)]
pub struct FieldScheduleService {
    fields: Arc<dyn FieldStore>,
    time_slots: Arc<dyn TimeSlotStore>,
    schedules: Arc<dyn FieldScheduleStore>,
    generator: ScheduleGenerator,
}

impl FieldScheduleService {
    pub fn new(
        fields: Arc<dyn FieldStore>,
        time_slots: Arc<dyn TimeSlotStore>,
        schedules: Arc<dyn FieldScheduleStore>,
        generator: ScheduleGenerator,
    ) -> Self {
        Self {
            fields,
            time_slots,
            schedules,
            generator,
        }
    }

    pub fn generator(&self) -> &ScheduleGenerator {
        &self.generator
    }

    pub async fn get_all_paginated(
        &self,
        params: &PaginationParams,
    ) -> BookingResult<Paginated<FieldScheduleResponse>> {
        let query = PageQuery::new(params, FIELD_SCHEDULE_SORT_COLUMNS)?;
        let (schedules, total) = self.schedules.find_all_paginated(&query).await?;
        let data = schedules.into_iter().map(FieldScheduleResponse::from).collect();
        Ok(paginate(&query, total, data))
    }

    /// Booking grid of one field for one day, ordered by slot start time.
    pub async fn get_all_by_field_and_date(
        &self,
        field_uuid: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<FieldScheduleForBookingResponse>> {
        let field = self.fields.find_by_uuid(field_uuid).await?;
        let schedules = self
            .schedules
            .find_all_by_field_and_date(field.id, date)
            .await?;

        Ok(schedules
            .into_iter()
            .map(|schedule| FieldScheduleForBookingResponse {
                uuid: schedule.uuid,
                price_per_hour: format_rupiah(i64::from(schedule.price_per_hour)),
                date: date_label(schedule.date),
                status: schedule.status,
                time: time_range_label(schedule.start_time, schedule.end_time),
            })
            .collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldScheduleResponse> {
        Ok(self.schedules.find_by_uuid(uuid).await?.into())
    }

    pub async fn create(&self, request: &CreateFieldScheduleRequest) -> BookingResult<u64> {
        self.generator.create(request).await
    }

    pub async fn generate_for_one_month(&self, field_uuid: Uuid) -> BookingResult<u64> {
        self.generator.generate_for_one_month(field_uuid).await
    }

    /// Moves a schedule to `request.date` and `request.time_id`.
    ///
    /// # Errors
    ///
    /// * `BookingError::ScheduleNotFound` / `BookingError::TimeNotFound`
    /// * `BookingError::ScheduleAlreadyExists` - another schedule of the same
    ///   field already holds the target date and slot
    pub async fn update(
        &self,
        uuid: Uuid,
        request: &UpdateFieldScheduleRequest,
    ) -> BookingResult<FieldScheduleResponse> {
        let schedule = self.schedules.find_by_uuid(uuid).await?;
        let slot = self.time_slots.find_by_uuid(request.time_id).await?;

        // Re-saving a schedule onto its own date and slot is a no-op, not a conflict.
        if let Some(existing) = self
            .schedules
            .find_by_date_and_slot(request.date, slot.id, schedule.field_id)
            .await?
        {
            if existing.uuid != schedule.uuid {
                warn!(
                    "Cannot move schedule {} onto {} {}: held by {}",
                    uuid, request.date, slot.uuid, existing.uuid
                );
                return Err(BookingError::ScheduleAlreadyExists);
            }
        }

        let updated = self.schedules.update(uuid, request.date, slot.id).await?;
        info!(
            "Moved schedule {} to {} {}",
            uuid, updated.date, updated.time_uuid
        );
        Ok(updated.into())
    }

    /// Books every listed schedule, or none of them.
    ///
    /// # Errors
    ///
    /// * `BookingError::Validation` - empty list
    /// * `BookingError::ScheduleNotFound` - the first unknown id; nothing is booked
    pub async fn update_status(
        &self,
        request: &UpdateStatusFieldScheduleRequest,
    ) -> BookingResult<()> {
        if request.field_schedule_ids.is_empty() {
            return Err(BookingError::validation(
                "fieldScheduleIDs must not be empty",
            ));
        }

        for uuid in &request.field_schedule_ids {
            self.schedules.find_by_uuid(*uuid).await?;
        }

        let booked = self
            .schedules
            .update_status_batch(ScheduleStatus::Booked, &request.field_schedule_ids)
            .await?;
        info!("Booked {} schedules", booked);
        Ok(())
    }

    pub async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        self.schedules.find_by_uuid(uuid).await?;
        self.schedules.delete(uuid).await?;
        info!("Deleted schedule {}", uuid);
        Ok(())
    }
}
