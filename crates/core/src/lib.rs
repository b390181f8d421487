//! # Fieldbook core
//!
//! Domain types and services for sports-field booking inventory: fields,
//! the shared time-slot catalog, and per-day field schedules with their
//! booking status.
//!
//! Storage is reached only through the traits in [`store`]; the services in
//! [`services`] hold the schedule-generation and conflict rules.

pub mod errors;
pub mod format;
pub mod memory;
pub mod mock;
pub mod models;
pub mod pagination;
pub mod services;
pub mod store;
