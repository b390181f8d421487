use fieldbook_core::errors::BookingError;

/// Wraps a driver error as a storage failure.
pub fn db_error(err: sqlx::Error) -> BookingError {
    BookingError::Database(eyre::Report::new(err))
}

/// Like [`db_error`], but a unique-constraint violation becomes
/// `ScheduleAlreadyExists`. Only `field_schedules` carries a unique key
/// callers can hit, so this is used for schedule writes.
pub fn schedule_write_error(err: sqlx::Error) -> BookingError {
    if is_unique_violation(&err) {
        return BookingError::ScheduleAlreadyExists;
    }
    db_error(err)
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
