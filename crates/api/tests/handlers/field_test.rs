use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use fieldbook_core::{models::field::FieldResponse, pagination::Paginated};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{TestContext, UPLOAD_BASE_URL};

fn field_form(code: &str, price: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", format!("Lapangan {code}"))
        .add_text("code", code.to_string())
        .add_text("pricePerHour", price.to_string())
}

fn jpeg(name: &str) -> Part {
    Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name(name.to_string())
        .mime_type("image/jpeg")
}

#[tokio::test]
async fn test_create_field_stores_images() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/v1/field")
        .multipart(field_form("A", "150000").add_part("images", jpeg("court.jpg")))
        .await;
    response.assert_status(StatusCode::CREATED);
    let field = response.json::<FieldResponse>();

    assert_eq!(field.code, "A");
    assert_eq!(field.price_per_hour, 150_000);
    assert_eq!(field.images.len(), 1);
    let url = &field.images[0];
    assert!(url.starts_with(&format!("{UPLOAD_BASE_URL}/images/")));
    assert!(url.ends_with(".jpg"));

    // the stored file is served back under /uploads
    let relative = url.trim_start_matches("http://localhost:3000");
    let served = ctx.server.get(relative).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().to_vec(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn test_create_field_without_image_rejected() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/v1/field")
        .multipart(field_form("A", "150000"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_field_with_bad_price_rejected() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/v1/field")
        .multipart(field_form("A", "abc").add_part("images", jpeg("a.jpg")))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_field_requires_multipart() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/v1/field")
        .json(&json!({ "name": "A", "code": "A", "pricePerHour": 1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_field_keeps_images_without_upload() {
    let ctx = TestContext::new();
    let field = ctx.seed_field("A").await;

    let response = ctx
        .server
        .put(&format!("/api/v1/field/{}", field.uuid))
        .multipart(field_form("A2", "175000"))
        .await;
    response.assert_status_ok();
    let updated = response.json::<FieldResponse>();

    assert_eq!(updated.code, "A2");
    assert_eq!(updated.price_per_hour, 175_000);
    assert_eq!(updated.images, field.images);
}

#[tokio::test]
async fn test_list_and_paginate_fields() {
    let ctx = TestContext::new();
    for code in ["B", "A", "C"] {
        ctx.seed_field(code).await;
    }

    let all = ctx.server.get("/api/v1/field").await.json::<Vec<FieldResponse>>();
    assert_eq!(all.len(), 3);

    let page = ctx
        .server
        .get("/api/v1/field/pagination")
        .add_query_param("page", 2)
        .add_query_param("limit", 2)
        .add_query_param("sortColumn", "code")
        .await
        .json::<Paginated<FieldResponse>>();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].code, "C");
    assert_eq!(page.previous_page, Some(1));
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_delete_field() {
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
    let path = format!("/api/v1/field/{}", field.uuid);

    ctx.server.delete(&path).await.assert_status(StatusCode::CONFLICT);

    let other = ctx.seed_field("B").await;
    ctx.server
        .delete(&format!("/api/v1/field/{}", other.uuid))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .get(&format!("/api/v1/field/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    ctx.server.get("/health").await.assert_json(&json!({ "status": "ok" }));
    ctx.server.get("/version").await.assert_status_ok();
}
