pub mod calendar;
pub mod health;
pub mod schedule;
pub mod slots;
pub mod time;
