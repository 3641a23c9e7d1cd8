use chrono::NaiveDate;
use clinicslots_core::{
    errors::{SlotError, SlotResult},
    models::{ConsultationMode, TimeSlot},
    session::CurrentUser,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: CurrentUser,
}

/// Error payload returned by the scheduling API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

/// Front desk booking of a selected slot for a phone-in patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub patient_id: Uuid,
    pub slot_id: Uuid,
    pub clinician_id: Uuid,
    pub centre_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub mode: ConsultationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Builds a request for `slot`, refusing slots that are not open or that
    /// cannot host the requested consultation mode.
    pub fn for_slot(slot: &TimeSlot, patient_id: Uuid, mode: ConsultationMode) -> SlotResult<Self> {
        if !slot.is_available() {
            return Err(SlotError::Validation(format!(
                "slot {} on {} is {}",
                slot.start_time,
                slot.date,
                slot.status.as_str()
            )));
        }
        if !slot.mode.supports(mode) {
            return Err(SlotError::Validation(format!(
                "slot is offered {} only, cannot book {}",
                slot.mode.as_str(),
                mode.as_str()
            )));
        }

        Ok(Self {
            patient_id,
            slot_id: slot.id,
            clinician_id: slot.clinician_id,
            centre_id: slot.centre_id,
            date: slot.date,
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            mode,
            notes: None,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub appointment_id: Uuid,
    pub slot_id: Uuid,
    pub status: String,
}
