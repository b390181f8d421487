#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Asia::Jakarta;
use fieldbook_api::{ApiState, build_router, uploads::LocalObjectStorage};
use fieldbook_core::{
    memory::InMemoryStore,
    models::{
        field::{Field, FieldData},
        time_slot::TimeSlot,
    },
    services::Services,
    store::{FieldStore, TimeSlotStore},
};
use tempfile::TempDir;

pub const UPLOAD_BASE_URL: &str = "http://localhost:3000/uploads";

/// A router over the in-memory store, with uploads going to a temp dir.
pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub upload_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("create upload dir");
        let store = Arc::new(InMemoryStore::new());
        let services = Services::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(LocalObjectStorage::new(upload_dir.path(), UPLOAD_BASE_URL)),
            Jakarta,
        );
        let state = Arc::new(ApiState { services });
        let server =
            TestServer::new(build_router(state, upload_dir.path())).expect("start test server");

        Self {
            server,
            store,
            upload_dir,
        }
    }

    pub async fn seed_field(&self, code: &str) -> Field {
        let fields: &dyn FieldStore = self.store.as_ref();
        fields
            .create(FieldData {
                name: format!("Lapangan {code}"),
                code: code.to_string(),
                price_per_hour: 150_000,
                images: vec![format!("{UPLOAD_BASE_URL}/images/{code}.jpg")],
            })
            .await
            .expect("seed field")
    }

    pub async fn seed_slot(&self, start_hour: u32, end_hour: u32) -> TimeSlot {
        let slots: &dyn TimeSlotStore = self.store.as_ref();
        slots
            .create(hm(start_hour), hm(end_hour))
            .await
            .expect("seed time slot")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn hm(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).expect("valid time")
}
