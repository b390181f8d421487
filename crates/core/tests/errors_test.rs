use std::error::Error;

use fieldbook_core::errors::{BookingError, BookingResult};
use uuid::Uuid;

#[test]
fn test_booking_error_display() {
    let id = Uuid::nil();
    let field = BookingError::FieldNotFound(id);
    let time = BookingError::TimeNotFound(id);
    let schedule = BookingError::ScheduleNotFound(id);
    let exists = BookingError::ScheduleAlreadyExists;
    let validation = BookingError::validation("Invalid input");
    let database = BookingError::Database(eyre::eyre!("Database connection failed"));
    let internal = BookingError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        field.to_string(),
        "Field not found: 00000000-0000-0000-0000-000000000000"
    );
    assert!(time.to_string().starts_with("Time slot not found:"));
    assert!(schedule.to_string().starts_with("Field schedule not found:"));
    assert_eq!(exists.to_string(), "Field schedule already exists");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_classification() {
    let id = Uuid::new_v4();

    assert!(BookingError::FieldNotFound(id).is_not_found());
    assert!(BookingError::TimeNotFound(id).is_not_found());
    assert!(BookingError::ScheduleNotFound(id).is_not_found());
    assert!(!BookingError::ScheduleAlreadyExists.is_not_found());

    assert!(BookingError::ScheduleAlreadyExists.is_conflict());
    assert!(BookingError::FieldHasSchedules(id).is_conflict());
    assert!(!BookingError::validation("x").is_conflict());
}

#[test]
fn test_booking_result() {
    let result: BookingResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: BookingResult<i32> = Err(BookingError::ScheduleNotFound(Uuid::new_v4()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let error: BookingError = eyre::eyre!("connection reset").into();

    assert!(matches!(error, BookingError::Database(_)));
    assert!(error.to_string().contains("connection reset"));
}

#[test]
fn test_box_error_conversion() {
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(std::io::Error::other("IO error"));
    let error: BookingError = boxed_error.into();

    assert!(error.to_string().contains("IO error"));
    assert!(error.source().is_some());
}
