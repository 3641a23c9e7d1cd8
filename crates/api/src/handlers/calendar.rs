//! # Calendar Handlers
//!
//! Month, week and day-grid view models computed over a caller-supplied slot
//! list. The slots are taken as given; their statuses are never changed.

use axum::Json;
use chrono::{NaiveDate, NaiveDateTime};
use clinicslots_core::{
    calendar::{slot_grid, week_view, MonthCursor, MonthView, SlotCard, WeekView},
    models::TimeSlot,
    slots::local_now,
};
use serde::{Deserialize, Serialize};

use crate::middleware::error_handling::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthRequest {
    pub year: i32,
    pub month: u32,
    /// Months to move from `year`/`month` before building the view, as the
    /// calendar's previous/next arrows do
    #[serde(default)]
    pub offset: i32,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekRequest {
    /// Any date in the wanted week; the view starts on the Sunday before it
    pub anchor: NaiveDate,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GridRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
    /// Reference wall-clock time for past-slot detection (server local time when omitted)
    pub now: Option<NaiveDateTime>,
}

pub async fn month(Json(payload): Json<MonthRequest>) -> Result<Json<MonthView>, AppError> {
    let cursor = MonthCursor::new(payload.year, payload.month)?.shift(payload.offset)?;
    Ok(Json(cursor.view(&payload.slots)?))
}

pub async fn week(Json(payload): Json<WeekRequest>) -> Result<Json<WeekView>, AppError> {
    Ok(Json(week_view(payload.anchor, &payload.slots)?))
}

pub async fn grid(Json(payload): Json<GridRequest>) -> Result<Json<Vec<SlotCard>>, AppError> {
    let now = payload.now.unwrap_or_else(local_now);
    Ok(Json(slot_grid(payload.date, &payload.slots, now)?))
}
