use std::sync::Arc;

use axum_test::TestServer;
use clinicslots_api::{router, ApiState};
use clinicslots_core::models::{AvailabilityRule, ConsultationMode, SlotStatus, TimeSlot};
use serde_json::{json, Value};
use uuid::Uuid;

pub const MAX_RANGE_DAYS: i64 = 31;

pub fn test_server() -> TestServer {
    let state = Arc::new(ApiState {
        max_range_days: MAX_RANGE_DAYS,
    });
    TestServer::new(router(state)).expect("Failed to start test server")
}

pub fn rule_json(day_of_week: u8, start: &str, end: &str, duration: i32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "clinicianId": Uuid::new_v4(),
        "centreId": Uuid::new_v4(),
        "dayOfWeek": day_of_week,
        "startTime": start,
        "endTime": end,
        "slotDurationMinutes": duration,
        "mode": "IN_PERSON"
    })
}

pub fn rule(day_of_week: u8, start: &str, end: &str, duration: i32) -> AvailabilityRule {
    serde_json::from_value(rule_json(day_of_week, start, end, duration)).expect("valid rule json")
}

pub fn slot(date: &str, start: &str, end: &str, status: SlotStatus) -> TimeSlot {
    TimeSlot {
        id: Uuid::new_v4(),
        clinician_id: Uuid::nil(),
        centre_id: Uuid::nil(),
        date: date.parse().expect("valid date"),
        start_time: start.to_string(),
        end_time: end.to_string(),
        duration: 30,
        mode: ConsultationMode::InPerson,
        status,
        appointment_id: None,
    }
}
