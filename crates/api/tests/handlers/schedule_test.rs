use axum::http::StatusCode;
use clinicslots_api::handlers::schedule::{BuildResponse, ScheduleSummary};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::test_server;

fn window(start: &str, end: &str, duration: i32) -> Value {
    json!({
        "startTime": start,
        "endTime": end,
        "slotDurationMinutes": duration,
        "mode": "BOTH"
    })
}

#[test_log::test(tokio::test)]
async fn test_validate_schedule_counts_slots() {
    let server = test_server();

    let response = server
        .post("/api/schedule/validate")
        .json(&json!({
            "days": {
                "monday": [window("09:00", "12:00", 30), window("13:00", "14:00", 60)],
                "fri": [window("14:00", "15:00", 20)]
            }
        }))
        .await;

    response.assert_status_ok();
    let summary = response.json::<ScheduleSummary>();
    assert_eq!(summary.windows, 3);
    assert_eq!(summary.total_slots, 6 + 1 + 3);
}

#[test_log::test(tokio::test)]
async fn test_validate_schedule_rejects_overlap() {
    let server = test_server();

    let response = server
        .post("/api/schedule/validate")
        .json(&json!({
            "days": { "1": [window("09:00", "12:00", 30), window("11:00", "13:00", 30)] }
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Monday: window 09:00-12:00 overlaps 11:00-13:00"));
}

#[test_log::test(tokio::test)]
async fn test_validate_schedule_rejects_unknown_day() {
    let server = test_server();

    let response = server
        .post("/api/schedule/validate")
        .json(&json!({ "days": { "funday": [window("09:00", "10:00", 30)] } }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_validate_empty_schedule_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/schedule/validate")
        .json(&json!({ "days": {} }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_build_schedule_emits_rules_in_day_order() {
    let server = test_server();
    let clinician_id = Uuid::new_v4();
    let centre_id = Uuid::new_v4();

    let response = server
        .post("/api/schedule/build")
        .json(&json!({
            "clinicianId": clinician_id,
            "centreId": centre_id,
            "days": {
                "wednesday": [window("14:00", "15:00", 30)],
                "mon": [window("13:00", "14:00", 60), window("09:00", "10:00", 30)]
            }
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<BuildResponse>();
    assert_eq!(body.total_slots, 1 + 2 + 2);

    let layout: Vec<(u8, &str)> = body
        .rules
        .iter()
        .map(|rule| (rule.day_of_week, rule.start_time.as_str()))
        .collect();
    assert_eq!(layout, vec![(1, "09:00"), (1, "13:00"), (3, "14:00")]);
    assert!(body
        .rules
        .iter()
        .all(|rule| rule.clinician_id == clinician_id && rule.centre_id == centre_id));
}
