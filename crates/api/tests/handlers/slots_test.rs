use axum::http::StatusCode;
use clinicslots_api::handlers::slots::{CountResponse, SlotsResponse};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{rule, rule_json, test_server, MAX_RANGE_DAYS};

#[test_log::test(tokio::test)]
async fn test_preview_full_day() {
    let server = test_server();
    let rule = rule(1, "09:00", "17:00", 30);

    let response = server
        .post("/api/slots/preview")
        .json(&json!({ "rule": rule, "date": "2024-03-11" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SlotsResponse>();
    assert_eq!(body.count, 16);
    assert_eq!(body.slots.len(), 16);
    assert_eq!(body.slots[0].start_time, "09:00");
    assert_eq!(body.slots[15].end_time, "17:00");
    assert!(body.slots.iter().all(|slot| slot.clinician_id == rule.clinician_id));
}

#[test_log::test(tokio::test)]
async fn test_preview_drops_trailing_partial_slot() {
    let server = test_server();

    let response = server
        .post("/api/slots/preview")
        .json(&json!({ "rule": rule_json(1, "09:00", "10:05", 30), "date": "2024-03-11" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["count"], 2);
    assert_eq!(body["slots"][1]["startTime"], "09:30");
    assert_eq!(body["slots"][1]["endTime"], "10:00");
}

#[test_log::test(tokio::test)]
async fn test_preview_zero_duration_is_empty() {
    let server = test_server();

    let response = server
        .post("/api/slots/preview")
        .json(&json!({ "rule": rule_json(1, "09:00", "17:00", 0), "date": "2024-03-11" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<SlotsResponse>().count, 0);
}

#[test_log::test(tokio::test)]
async fn test_preview_rejects_malformed_time() {
    let server = test_server();

    let response = server
        .post("/api/slots/preview")
        .json(&json!({ "rule": rule_json(1, "9am", "17:00", 30), "date": "2024-03-11" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid time"));
}

#[test_log::test(tokio::test)]
async fn test_count_matches_preview() {
    let server = test_server();

    let response = server
        .post("/api/slots/count")
        .json(&json!({ "startTime": "08:15", "endTime": "12:40", "durationMinutes": 20 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<CountResponse>().count, 13);
}

#[test_log::test(tokio::test)]
async fn test_expand_week() {
    let server = test_server();
    let rules = json!([
        rule_json(1, "09:00", "10:00", 30),
        rule_json(5, "14:00", "15:00", 60),
    ]);

    let response = server
        .post("/api/slots/expand")
        .json(&json!({ "rules": rules, "from": "2024-03-10", "to": "2024-03-16" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SlotsResponse>();
    let summary: Vec<(String, String)> = body
        .slots
        .iter()
        .map(|slot| (slot.date.to_string(), slot.start_time.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("2024-03-11".to_string(), "09:00".to_string()),
            ("2024-03-11".to_string(), "09:30".to_string()),
            ("2024-03-15".to_string(), "14:00".to_string()),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_expand_rejects_long_range() {
    let server = test_server();

    let response = server
        .post("/api/slots/expand")
        .json(&json!({ "rules": [], "from": "2024-01-01", "to": "2024-03-31" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains(&format!("at most {}", MAX_RANGE_DAYS)));
}

#[test_log::test(tokio::test)]
async fn test_expand_rejects_reversed_range() {
    let server = test_server();

    let response = server
        .post("/api/slots/expand")
        .json(&json!({ "rules": [], "from": "2024-03-16", "to": "2024-03-10" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
