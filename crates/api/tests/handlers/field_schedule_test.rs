use axum::http::StatusCode;
use fieldbook_core::{
    models::field_schedule::{FieldScheduleForBookingResponse, FieldScheduleResponse},
    pagination::Paginated,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_and_book_flow() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    let slot1 = ctx.seed_slot(9, 10).await;
    let slot2 = ctx.seed_slot(10, 11).await;

    let response = ctx
        .server
        .post("/api/v1/field/schedule")
        .json(&json!({
            "fieldID": field.uuid,
            "date": "2024-06-01",
            "timeIDs": [slot2.uuid, slot1.uuid],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>(), json!({ "created": 2 }));

    let grid = ctx
        .server
        .get(&format!("/api/v1/field/schedule/lists/{}", field.uuid))
        .add_query_param("date", "2024-06-01")
        .await;
    grid.assert_status_ok();
    let grid = grid.json::<Vec<FieldScheduleForBookingResponse>>();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[0].time, "09:00 - 10:00");
    assert_eq!(grid[0].price_per_hour, "Rp 150.000");
    assert_eq!(grid[0].date, "01 Jun");

    let booked = ctx
        .server
        .patch("/api/v1/field/schedule/status")
        .json(&json!({ "fieldScheduleIDs": [grid[0].uuid] }))
        .await;
    booked.assert_status(StatusCode::NO_CONTENT);

    let schedule = ctx
        .server
        .get(&format!("/api/v1/field/schedule/{}", grid[0].uuid))
        .await
        .json::<Value>();
    assert_eq!(schedule["status"], "Booked");
    assert_eq!(schedule["fieldName"], "Lapangan A");
    assert_eq!(schedule["time"], "09:00:00 - 10:00:00");
}

#[tokio::test]
async fn test_duplicate_create_is_conflict() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    let slot = ctx.seed_slot(9, 10).await;
    let body = json!({
        "fieldID": field.uuid,
        "date": "2024-06-01",
        "timeIDs": [slot.uuid],
    });

    ctx.server
        .post("/api/v1/field/schedule")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
    let response = ctx.server.post("/api/v1/field/schedule").json(&body).await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Field schedule already exists" })
    );
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/v1/field/schedule")
        .json(&json!({ "fieldID": "not-a-uuid", "date": "2024-06-01", "timeIDs": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/v1/field/schedule")
        .json(&json!({ "fieldID": Uuid::new_v4(), "date": "June 1st", "timeIDs": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/v1/field/schedule/not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_field_is_not_found() {
    let ctx = TestContext::new();
    let slot = ctx.seed_slot(9, 10).await;

    let response = ctx
        .server
        .post("/api/v1/field/schedule")
        .json(&json!({
            "fieldID": Uuid::new_v4(),
            "date": "2024-06-01",
            "timeIDs": [slot.uuid],
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.store.schedule_count().await, 0);
}

#[tokio::test]
async fn test_generate_one_month() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    ctx.seed_slot(8, 9).await;
    ctx.seed_slot(9, 10).await;

    let response = ctx
        .server
        .post("/api/v1/field/schedule/one-month")
        .json(&json!({ "fieldID": field.uuid }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>(), json!({ "created": 60 }));

    ctx.server
        .post("/api/v1/field/schedule/one-month")
        .json(&json!({ "fieldID": field.uuid }))
        .await
        .assert_status(StatusCode::CONFLICT);
    assert_eq!(ctx.store.schedule_count().await, 60);
}

#[tokio::test]
async fn test_generate_without_time_slots_is_bad_request() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;

    ctx.server
        .post("/api/v1/field/schedule/one-month")
        .json(&json!({ "fieldID": field.uuid }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    let slot1 = ctx.seed_slot(9, 10).await;
    let slot2 = ctx.seed_slot(10, 11).await;
    ctx.server
        .post("/api/v1/field/schedule")
        .json(&json!({
            "fieldID": field.uuid,
            "date": "2024-06-01",
            "timeIDs": [slot1.uuid, slot2.uuid],
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let grid = ctx
        .server
        .get(&format!("/api/v1/field/schedule/lists/{}", field.uuid))
        .add_query_param("date", "2024-06-01")
        .await
        .json::<Vec<FieldScheduleForBookingResponse>>();
    let first = grid[0].uuid;
    let path = format!("/api/v1/field/schedule/{first}");

    ctx.server
        .put(&path)
        .json(&json!({ "date": "2024-06-01", "timeID": slot2.uuid }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let moved = ctx
        .server
        .put(&path)
        .json(&json!({ "date": "2024-06-02", "timeID": slot2.uuid }))
        .await;
    moved.assert_status_ok();
    let moved = moved.json::<FieldScheduleResponse>();
    assert_eq!(moved.date.to_string(), "2024-06-02");
    assert_eq!(moved.time, "10:00:00 - 11:00:00");

    ctx.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_with_unknown_id_books_nothing() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    let slot = ctx.seed_slot(9, 10).await;
    ctx.server
        .post("/api/v1/field/schedule")
        .json(&json!({
            "fieldID": field.uuid,
            "date": "2024-06-01",
            "timeIDs": [slot.uuid],
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let grid = ctx
        .server
        .get(&format!("/api/v1/field/schedule/lists/{}", field.uuid))
        .add_query_param("date", "2024-06-01")
        .await
        .json::<Vec<FieldScheduleForBookingResponse>>();

    ctx.server
        .patch("/api/v1/field/schedule/status")
        .json(&json!({ "fieldScheduleIDs": [grid[0].uuid, Uuid::new_v4()] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let schedule = ctx
        .server
        .get(&format!("/api/v1/field/schedule/{}", grid[0].uuid))
        .await
        .json::<Value>();
    assert_eq!(schedule["status"], "Available");
}

#[tokio::test]
async fn test_paginated_listing() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;
    let slot = ctx.seed_slot(9, 10).await;
    for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        ctx.server
            .post("/api/v1/field/schedule")
            .json(&json!({ "fieldID": field.uuid, "date": day, "timeIDs": [slot.uuid] }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page = ctx
        .server
        .get("/api/v1/field/schedule")
        .add_query_param("page", 1)
        .add_query_param("limit", 2)
        .add_query_param("sortColumn", "date")
        .add_query_param("sortOrder", "desc")
        .await;
    page.assert_status_ok();
    let page = page.json::<Paginated<FieldScheduleResponse>>();

    assert_eq!(page.count, 3);
    assert_eq!(page.total_page, 2);
    assert_eq!(page.next_page, Some(2));
    assert_eq!(page.previous_page, None);
    assert_eq!(page.data[0].date.to_string(), "2024-06-03");

    ctx.server
        .get("/api/v1/field/schedule")
        .add_query_param("page", 1)
        .add_query_param("limit", 2)
        .add_query_param("sortColumn", "uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/v1/field/schedule")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
