use axum::http::StatusCode;
use clinicslots_api::handlers::time::TwentyFourHourResponse;
use clinicslots_core::time::{Period, TwelveHourTime};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_twelve_hour_conversion() {
    let server = test_server();

    let response = server
        .get("/api/time/12h")
        .add_query_param("time", "13:30")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<TwelveHourTime>(),
        TwelveHourTime {
            hour: 1,
            minute: 30,
            period: Period::PM
        }
    );
}

#[tokio::test]
async fn test_twelve_hour_rejects_malformed_time() {
    let server = test_server();

    let response = server
        .get("/api/time/12h")
        .add_query_param("time", "25:00")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_twenty_four_hour_conversion() {
    let server = test_server();

    let midnight = server
        .post("/api/time/24h")
        .json(&json!({ "hour": 12, "minute": 0, "period": "AM" }))
        .await;
    midnight.assert_status_ok();
    assert_eq!(midnight.json::<TwentyFourHourResponse>().time, "00:00");

    let noon = server
        .post("/api/time/24h")
        .json(&json!({ "hour": 12, "minute": 0, "period": "PM" }))
        .await;
    noon.assert_status_ok();
    assert_eq!(noon.json::<TwentyFourHourResponse>().time, "12:00");
}
