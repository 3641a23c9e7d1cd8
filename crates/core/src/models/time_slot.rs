use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::availability::ConsultationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Blocked,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Booked => "booked",
            SlotStatus::Blocked => "blocked",
        }
    }
}

/// A concrete, dated, fixed-duration interval as reported by the scheduling API.
///
/// `status` is resolved upstream by the booking system and is never changed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub clinician_id: Uuid,
    pub centre_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: i32,
    pub mode: ConsultationMode,
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
}

impl TimeSlot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// One slot produced by expanding an availability rule on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
    pub clinician_id: Uuid,
    pub centre_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: i32,
    pub mode: ConsultationMode,
}

impl SlotDescriptor {
    /// Stable id for this descriptor: the same clinician, centre, date and start
    /// time always map to the same UUID.
    pub fn slot_id(&self) -> Uuid {
        let key = format!(
            "{}/{}/{}/{}",
            self.clinician_id, self.centre_id, self.date, self.start_time
        );
        Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
    }

    pub fn into_slot(self, status: SlotStatus) -> TimeSlot {
        TimeSlot {
            id: self.slot_id(),
            clinician_id: self.clinician_id,
            centre_id: self.centre_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration: self.duration,
            mode: self.mode,
            status,
            appointment_id: None,
        }
    }
}
