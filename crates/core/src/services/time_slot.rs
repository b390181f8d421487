use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::time_slot::{CreateTimeSlotRequest, TimeSlotResponse},
    store::TimeSlotStore,
};

#[derive(Clone)]
pub struct TimeSlotService {
    time_slots: Arc<dyn TimeSlotStore>,
}

impl TimeSlotService {
    pub fn new(time_slots: Arc<dyn TimeSlotStore>) -> Self {
        Self { time_slots }
    }

    pub async fn get_all(&self) -> BookingResult<Vec<TimeSlotResponse>> {
        let slots = self.time_slots.find_all().await?;
        Ok(slots.into_iter().map(TimeSlotResponse::from).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeSlotResponse> {
        Ok(self.time_slots.find_by_uuid(uuid).await?.into())
    }

    pub async fn create(&self, request: &CreateTimeSlotRequest) -> BookingResult<TimeSlotResponse> {
        if request.end_time <= request.start_time {
            return Err(BookingError::Validation(format!(
                "endTime {} must be after startTime {}",
                request.end_time, request.start_time
            )));
        }

        let slot = self
            .time_slots
            .create(request.start_time, request.end_time)
            .await?;
        info!(
            "Created time slot {} ({} - {})",
            slot.uuid, slot.start_time, slot.end_time
        );
        Ok(slot.into())
    }
}
