use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    time::minutes_since_midnight,
};

/// Channel through which an appointment takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationMode {
    InPerson,
    Online,
    Both,
}

impl ConsultationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::InPerson => "IN_PERSON",
            ConsultationMode::Online => "ONLINE",
            ConsultationMode::Both => "BOTH",
        }
    }

    /// Whether a slot offered in this mode can host an appointment in `requested`.
    pub fn supports(&self, requested: ConsultationMode) -> bool {
        match self {
            ConsultationMode::Both => true,
            mode => *mode == requested,
        }
    }
}

/// A recurring weekly template describing when a clinician can be booked at a centre.
///
/// Times are zero-padded 24-hour "HH:MM" strings, which keeps lexicographic and
/// chronological order identical. `day_of_week` counts from Sunday = 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub clinician_id: Uuid,
    pub centre_id: Uuid,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub slot_duration_minutes: i32,
    pub mode: ConsultationMode,
}

impl AvailabilityRule {
    /// Checks the invariants a well-formed rule from the scheduling API satisfies.
    ///
    /// The slot enumerator does not depend on this having run: a rule with an
    /// empty window or a non-positive duration simply expands to no slots.
    pub fn validate(&self) -> SlotResult<()> {
        if self.day_of_week > 6 {
            return Err(SlotError::Validation(format!(
                "day of week must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }

        let start = minutes_since_midnight(&self.start_time)?;
        let end = minutes_since_midnight(&self.end_time)?;
        if start >= end {
            return Err(SlotError::Validation(format!(
                "start time {} must be before end time {}",
                self.start_time, self.end_time
            )));
        }

        if self.slot_duration_minutes <= 0 {
            return Err(SlotError::Validation(format!(
                "slot duration must be positive, got {}",
                self.slot_duration_minutes
            )));
        }

        Ok(())
    }
}
