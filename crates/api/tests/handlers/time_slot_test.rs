use axum::http::StatusCode;
use fieldbook_core::models::time_slot::TimeSlotResponse;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{TestContext, hm};

#[tokio::test]
async fn test_create_and_list_time_slots() {
    let ctx = TestContext::new();

    for (start, end) in [("18:00:00", "19:00:00"), ("07:00:00", "08:00:00")] {
        ctx.server
            .post("/api/v1/time")
            .json(&json!({ "startTime": start, "endTime": end }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let slots = ctx.server.get("/api/v1/time").await.json::<Vec<TimeSlotResponse>>();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start_time, hm(7));

    let one = ctx
        .server
        .get(&format!("/api/v1/time/{}", slots[1].uuid))
        .await
        .json::<TimeSlotResponse>();
    assert_eq!(one.end_time, hm(19));
}

#[tokio::test]
async fn test_inverted_time_slot_rejected() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/v1/time")
        .json(&json!({ "startTime": "10:00:00", "endTime": "09:00:00" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_time_slot() {
    let ctx = TestContext::new();

    ctx.server
        .get(&format!("/api/v1/time/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
