//! # Schedule Generation
//!
//! Produces bookable schedule rows for a field without ever creating a
//! second row for the same `(field, date, slot)`.
//!
//! Both paths check every candidate row before writing anything and abort on
//! the first conflict with `ScheduleAlreadyExists`, then persist the whole
//! set in one batch. The pre-check is only a fast path: the store's unique
//! constraint is the authority, and a violation it reports during the batch
//! surfaces as the same error.
//!
//! ## Horizon generation
//!
//! 1. Resolve the field
//! 2. Load the full time-slot catalog
//! 3. Walk the 30 days starting tomorrow, in the configured timezone
//! 4. For each day and slot, fail if the field already has that schedule
//! 5. Insert all `30 × |slots|` rows with status `Available`
//!
//! Existing schedules for the whole horizon are fetched with one range query
//! instead of one lookup per `(day, slot)`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::field_schedule::{CreateFieldScheduleRequest, NewFieldSchedule},
    store::{FieldScheduleStore, FieldStore, TimeSlotStore},
};

/// Number of days covered by horizon generation.
pub const HORIZON_DAYS: u64 = 30;

/// The generation horizon for `today`: tomorrow through `today + 30`.
pub fn horizon(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=HORIZON_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

#[derive(Clone)]
pub struct ScheduleGenerator {
    fields: Arc<dyn FieldStore>,
    time_slots: Arc<dyn TimeSlotStore>,
    schedules: Arc<dyn FieldScheduleStore>,
    timezone: Tz,
}

impl ScheduleGenerator {
    pub fn new(
        fields: Arc<dyn FieldStore>,
        time_slots: Arc<dyn TimeSlotStore>,
        schedules: Arc<dyn FieldScheduleStore>,
        timezone: Tz,
    ) -> Self {
        Self {
            fields,
            time_slots,
            schedules,
            timezone,
        }
    }

    /// Current calendar day in the business timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Creates schedules for one date and an explicit list of slots.
    ///
    /// Slots are resolved and checked in request order. Returns the number
    /// of rows written.
    ///
    /// # Errors
    ///
    /// * `BookingError::Validation` - empty or repeated slot list
    /// * `BookingError::FieldNotFound` / `BookingError::TimeNotFound`
    /// * `BookingError::ScheduleAlreadyExists` - any slot is already scheduled
    /// * `BookingError::Database` - storage failure, including during the batch insert
    pub async fn create(&self, request: &CreateFieldScheduleRequest) -> BookingResult<u64> {
        if request.time_ids.is_empty() {
            return Err(BookingError::validation("timeIDs must not be empty"));
        }
        let mut requested = HashSet::with_capacity(request.time_ids.len());
        if let Some(repeated) = request.time_ids.iter().find(|id| !requested.insert(**id)) {
            return Err(BookingError::Validation(format!(
                "time slot {repeated} is listed more than once"
            )));
        }

        let field = self.fields.find_by_uuid(request.field_id).await?;

        let mut rows = Vec::with_capacity(request.time_ids.len());
        for time_uuid in &request.time_ids {
            let slot = self.time_slots.find_by_uuid(*time_uuid).await?;

            if let Some(existing) = self
                .schedules
                .find_by_date_and_slot(request.date, slot.id, field.id)
                .await?
            {
                warn!(
                    "Schedule {} already covers field={} date={} time={}",
                    existing.uuid, field.uuid, request.date, slot.uuid
                );
                return Err(BookingError::ScheduleAlreadyExists);
            }

            rows.push(NewFieldSchedule::available(field.id, slot.id, request.date));
        }

        let created = self.schedules.create_batch(&rows).await?;
        info!(
            "Created {} schedules for field={} on {}",
            created, field.uuid, request.date
        );
        Ok(created)
    }

    /// Generates the 30-day horizon starting tomorrow.
    pub async fn generate_for_one_month(&self, field_uuid: Uuid) -> BookingResult<u64> {
        self.generate_from(field_uuid, self.today()).await
    }

    /// Generates the horizon that follows `today`.
    ///
    /// # Errors
    ///
    /// * `BookingError::FieldNotFound`
    /// * `BookingError::Validation` - the time-slot catalog is empty
    /// * `BookingError::ScheduleAlreadyExists` - the field already has any
    ///   schedule inside the horizon
    /// * `BookingError::Database`
    pub async fn generate_from(&self, field_uuid: Uuid, today: NaiveDate) -> BookingResult<u64> {
        let field = self.fields.find_by_uuid(field_uuid).await?;

        let slots = self.time_slots.find_all().await?;
        if slots.is_empty() {
            return Err(BookingError::validation(
                "No time slots are configured; create time slots before generating schedules",
            ));
        }

        let days = horizon(today);
        let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
            return Err(BookingError::Validation(format!(
                "Cannot build a schedule horizon after {today}"
            )));
        };

        let occupied: HashSet<(NaiveDate, i32)> = self
            .schedules
            .find_all_by_field_and_date_range(field.id, first, last)
            .await?
            .into_iter()
            .map(|schedule| (schedule.date, schedule.time_id))
            .collect();
        debug!(
            "Field {} has {} schedules between {} and {}",
            field.uuid,
            occupied.len(),
            first,
            last
        );

        let mut rows = Vec::with_capacity(days.len() * slots.len());
        for day in &days {
            for slot in &slots {
                if occupied.contains(&(*day, slot.id)) {
                    warn!(
                        "Horizon generation for field={} stopped: {} {} already scheduled",
                        field.uuid, day, slot.uuid
                    );
                    return Err(BookingError::ScheduleAlreadyExists);
                }
                rows.push(NewFieldSchedule::available(field.id, slot.id, *day));
            }
        }

        let created = self.schedules.create_batch(&rows).await?;
        info!(
            "Generated {} schedules for field={} from {} to {}",
            created, field.uuid, first, last
        );
        Ok(created)
    }
}
