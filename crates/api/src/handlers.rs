/// Field catalog handlers, including multipart image uploads
pub mod field;
/// Field schedule handlers
pub mod field_schedule;
/// Time slot catalog handlers
pub mod time_slot;
