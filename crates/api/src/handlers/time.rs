use axum::{extract::Query, Json};
use clinicslots_core::time::{to_12_hour, to_24_hour, Period, TwelveHourTime};
use serde::{Deserialize, Serialize};

use crate::middleware::error_handling::AppError;

#[derive(Debug, Deserialize)]
pub struct TwelveHourQuery {
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TwentyFourHourRequest {
    pub hour: u32,
    pub minute: u32,
    pub period: Period,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TwentyFourHourResponse {
    pub time: String,
}

pub async fn twelve_hour(
    Query(query): Query<TwelveHourQuery>,
) -> Result<Json<TwelveHourTime>, AppError> {
    Ok(Json(to_12_hour(&query.time)?))
}

pub async fn twenty_four_hour(
    Json(payload): Json<TwentyFourHourRequest>,
) -> Result<Json<TwentyFourHourResponse>, AppError> {
    let time = to_24_hour(payload.hour, payload.minute, payload.period)?;
    Ok(Json(TwentyFourHourResponse { time }))
}
