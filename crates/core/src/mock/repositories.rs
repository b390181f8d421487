use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
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
    store::{FieldScheduleStore, FieldStore, ObjectStorage, TimeSlotStore},
};

// Mock repositories for testing
mock! {
    pub FieldRepo {}

    #[async_trait]
    impl FieldStore for FieldRepo {
        async fn find_all(&self) -> BookingResult<Vec<Field>>;
        async fn find_all_paginated(&self, query: &PageQuery) -> BookingResult<(Vec<Field>, i64)>;
        async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<Field>;
        async fn create(&self, data: FieldData) -> BookingResult<Field>;
        async fn update(&self, uuid: Uuid, data: FieldData) -> BookingResult<Field>;
        async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
    }
}

mock! {
    pub TimeSlotRepo {}

    #[async_trait]
    impl TimeSlotStore for TimeSlotRepo {
        async fn find_all(&self) -> BookingResult<Vec<TimeSlot>>;
        async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeSlot>;
        async fn create(&self, start_time: NaiveTime, end_time: NaiveTime) -> BookingResult<TimeSlot>;
    }
}

mock! {
    pub FieldScheduleRepo {}

    #[async_trait]
    impl FieldScheduleStore for FieldScheduleRepo {
        async fn find_all_paginated(
            &self,
            query: &PageQuery,
        ) -> BookingResult<(Vec<FieldSchedule>, i64)>;
        async fn find_all_by_field_and_date(
            &self,
            field_id: i32,
            date: NaiveDate,
        ) -> BookingResult<Vec<FieldSchedule>>;
        async fn find_all_by_field_and_date_range(
            &self,
            field_id: i32,
            from: NaiveDate,
            to: NaiveDate,
        ) -> BookingResult<Vec<FieldSchedule>>;
        async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldSchedule>;
        async fn find_by_date_and_slot(
            &self,
            date: NaiveDate,
            time_id: i32,
            field_id: i32,
        ) -> BookingResult<Option<FieldSchedule>>;
        async fn create_batch(&self, schedules: &[NewFieldSchedule]) -> BookingResult<u64>;
        async fn update(
            &self,
            uuid: Uuid,
            date: NaiveDate,
            time_id: i32,
        ) -> BookingResult<FieldSchedule>;
        async fn update_status(&self, status: ScheduleStatus, uuid: Uuid) -> BookingResult<()>;
        async fn update_status_batch(
            &self,
            status: ScheduleStatus,
            uuids: &[Uuid],
        ) -> BookingResult<u64>;
        async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
    }
}

mock! {
    pub ObjectStore {}

    #[async_trait]
    impl ObjectStorage for ObjectStore {
        async fn upload(&self, path: &str, bytes: Vec<u8>) -> BookingResult<String>;
    }
}
