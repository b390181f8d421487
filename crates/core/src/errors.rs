use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Field not found: {0}")]
    FieldNotFound(Uuid),

    #[error("Time slot not found: {0}")]
    TimeNotFound(Uuid),

    #[error("Field schedule not found: {0}")]
    ScheduleNotFound(Uuid),

    #[error("Field schedule already exists")]
    ScheduleAlreadyExists,

    #[error("Field {0} still has schedules")]
    FieldHasSchedules(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for the field, time slot and schedule lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound(_) | Self::TimeNotFound(_) | Self::ScheduleNotFound(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ScheduleAlreadyExists | Self::FieldHasSchedules(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
