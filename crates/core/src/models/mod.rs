pub mod availability;
pub mod time_slot;

pub use availability::{AvailabilityRule, ConsultationMode};
pub use time_slot::{SlotDescriptor, SlotStatus, TimeSlot};
