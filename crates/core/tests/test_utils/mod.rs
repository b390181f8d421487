#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Asia::Jakarta;
use fieldbook_core::{
    errors::BookingResult,
    memory::InMemoryStore,
    models::{
        field::{Field, FieldData},
        field_schedule::FieldSchedule,
        time_slot::TimeSlot,
    },
    services::Services,
    store::{FieldScheduleStore, FieldStore, ObjectStorage, TimeSlotStore},
};

/// Object storage that only hands back a URL for the path.
pub struct FakeStorage;

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, path: &str, _bytes: Vec<u8>) -> BookingResult<String> {
        Ok(format!("https://cdn.test/{path}"))
    }
}

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub services: Services,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let services = Services::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(FakeStorage),
            Jakarta,
        );
        Self { store, services }
    }

    pub fn fields(&self) -> &dyn FieldStore {
        self.store.as_ref()
    }

    pub fn time_slots(&self) -> &dyn TimeSlotStore {
        self.store.as_ref()
    }

    pub fn schedules(&self) -> &dyn FieldScheduleStore {
        self.store.as_ref()
    }

    pub async fn seed_field(&self, code: &str) -> Field {
        self.fields()
            .create(FieldData {
                name: format!("Lapangan {code}"),
                code: code.to_string(),
                price_per_hour: 150_000,
                images: vec![format!("https://cdn.test/images/{code}.jpg")],
            })
            .await
            .expect("seed field")
    }

    pub async fn seed_slot(&self, start_hour: u32, end_hour: u32) -> TimeSlot {
        self.time_slots()
            .create(hm(start_hour, 0), hm(end_hour, 0))
            .await
            .expect("seed time slot")
    }

    pub async fn schedule_at(&self, field: &Field, on: NaiveDate, slot: &TimeSlot) -> FieldSchedule {
        self.schedules()
            .find_by_date_and_slot(on, slot.id, field.id)
            .await
            .expect("lookup")
            .expect("schedule exists")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}
