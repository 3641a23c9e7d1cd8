use axum::http::StatusCode;
use clinicslots_core::{
    calendar::{MonthView, SlotCard, WeekView},
    models::SlotStatus,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{slot, test_server};

#[test_log::test(tokio::test)]
async fn test_month_view() {
    let server = test_server();
    let slots = vec![
        slot("2024-03-11", "09:00", "09:30", SlotStatus::Available),
        slot("2024-03-11", "09:30", "10:00", SlotStatus::Booked),
    ];

    let response = server
        .post("/api/calendar/month")
        .json(&json!({ "year": 2024, "month": 3, "slots": slots }))
        .await;

    response.assert_status_ok();
    let view = response.json::<MonthView>();
    assert_eq!(view.days.len(), 31);
    assert_eq!(view.leading_blanks, 5);

    let monday = view.day("2024-03-11".parse().unwrap()).unwrap();
    assert!(monday.availability.has_available);
    assert!(monday.availability.has_booked);
    assert_eq!(monday.availability.available_count, 1);
}

#[test_log::test(tokio::test)]
async fn test_month_view_rejects_invalid_month() {
    let server = test_server();

    let response = server
        .post("/api/calendar/month")
        .json(&json!({ "year": 2024, "month": 13 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_month_view_applies_offset() {
    let server = test_server();

    let response = server
        .post("/api/calendar/month")
        .json(&json!({ "year": 2024, "month": 12, "offset": 2 }))
        .await;

    response.assert_status_ok();
    let view = response.json::<MonthView>();
    assert_eq!((view.year, view.month), (2025, 2));
    assert_eq!(view.days.len(), 28);

    let back = server
        .post("/api/calendar/month")
        .json(&json!({ "year": 2024, "month": 1, "offset": -1 }))
        .await;
    back.assert_status_ok();
    assert_eq!(back.json::<MonthView>().month, 12);
}

#[test_log::test(tokio::test)]
async fn test_week_view_rejects_unrepresentable_week() {
    let server = test_server();

    // Earliest date the calendar can hold; its Sunday would fall before it.
    let response = server
        .post("/api/calendar/week")
        .json(&json!({ "anchor": "-262143-01-01" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_week_view_starts_on_sunday() {
    let server = test_server();
    let slots = vec![slot("2024-03-14", "09:00", "09:30", SlotStatus::Available)];

    let response = server
        .post("/api/calendar/week")
        .json(&json!({ "anchor": "2024-03-14", "slots": slots }))
        .await;

    response.assert_status_ok();
    let view = response.json::<WeekView>();
    assert_eq!(view.start.to_string(), "2024-03-10");
    assert_eq!(view.days.len(), 7);
    assert_eq!(view.days[4].slots, slots);
}

#[test_log::test(tokio::test)]
async fn test_grid_uses_supplied_now() {
    let server = test_server();
    let slots = vec![
        slot("2024-03-11", "09:00", "09:30", SlotStatus::Available),
        slot("2024-03-11", "10:00", "10:30", SlotStatus::Available),
        slot("2024-03-11", "10:30", "11:00", SlotStatus::Blocked),
    ];

    let response = server
        .post("/api/calendar/grid")
        .json(&json!({ "date": "2024-03-11", "slots": slots, "now": "2024-03-11T09:45:00" }))
        .await;

    response.assert_status_ok();
    let cards = response.json::<Vec<SlotCard>>();
    let selectable: Vec<bool> = cards.iter().map(|card| card.selectable).collect();
    assert_eq!(selectable, vec![false, true, false]);
    assert_eq!(cards[1].label, "10:00 AM - 10:30 AM");
}
