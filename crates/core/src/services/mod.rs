//! Application services. Each one receives exactly the stores it needs.

pub mod field;
pub mod field_schedule;
pub mod generator;
pub mod time_slot;

use std::sync::Arc;

use chrono_tz::Tz;

use crate::store::{FieldScheduleStore, FieldStore, ObjectStorage, TimeSlotStore};

use self::{
    field::FieldService, field_schedule::FieldScheduleService, generator::ScheduleGenerator,
    time_slot::TimeSlotService,
};

/// All services, wired over one set of stores.
#[derive(Clone)]
pub struct Services {
    pub fields: FieldService,
    pub time_slots: TimeSlotService,
    pub schedules: FieldScheduleService,
}

impl Services {
    pub fn new(
        fields: Arc<dyn FieldStore>,
        time_slots: Arc<dyn TimeSlotStore>,
        schedules: Arc<dyn FieldScheduleStore>,
        storage: Arc<dyn ObjectStorage>,
        timezone: Tz,
    ) -> Self {
        let generator = ScheduleGenerator::new(
            fields.clone(),
            time_slots.clone(),
            schedules.clone(),
            timezone,
        );

        Self {
            fields: FieldService::new(fields.clone(), storage),
            time_slots: TimeSlotService::new(time_slots.clone()),
            schedules: FieldScheduleService::new(fields, time_slots, schedules, generator),
        }
    }
}
