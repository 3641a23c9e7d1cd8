//! # ClinicSlots Core
//!
//! Pure scheduling logic shared by the preview service and the API client:
//! turning weekly availability rules into bookable slots, classifying and
//! grouping them, and deriving the calendar view models built on top.
//!
//! Nothing in this crate performs I/O.

pub mod calendar;
pub mod errors;
pub mod models;
pub mod schedule_builder;
pub mod session;
pub mod slots;
pub mod time;
