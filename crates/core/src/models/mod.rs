pub mod field;
pub mod field_schedule;
pub mod status;
pub mod time_slot;
