use axum::{http::StatusCode, response::IntoResponse};
use fieldbook_api::middleware::error_handling::{AppError, map_error};
use fieldbook_core::errors::BookingError;
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[case(BookingError::FieldNotFound(Uuid::nil()), StatusCode::NOT_FOUND)]
#[case(BookingError::TimeNotFound(Uuid::nil()), StatusCode::NOT_FOUND)]
#[case(BookingError::ScheduleNotFound(Uuid::nil()), StatusCode::NOT_FOUND)]
#[case(BookingError::ScheduleAlreadyExists, StatusCode::CONFLICT)]
#[case(BookingError::FieldHasSchedules(Uuid::nil()), StatusCode::CONFLICT)]
#[case(BookingError::validation("Invalid input"), StatusCode::BAD_REQUEST)]
#[case(BookingError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("disk full"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[test]
fn test_from_eyre_report_is_server_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
