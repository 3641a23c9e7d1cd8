//! # Schedule Handlers
//!
//! Checks a clinician's weekly availability as edited in the schedule builder
//! and turns it into availability rules. Days are keyed the way the form sends
//! them ("monday", "mon" or "1"); nothing is stored here.

use std::collections::BTreeMap;

use axum::Json;
use clinicslots_core::{
    errors::SlotResult,
    models::AvailabilityRule,
    schedule_builder::{DayOfWeek, ScheduleWindow, WeeklyScheduleBuilder},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

/// Body of `POST /api/schedule/validate`
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub days: BTreeMap<String, Vec<ScheduleWindow>>,
}

/// Body of `POST /api/schedule/build`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub clinician_id: Uuid,
    pub centre_id: Uuid,
    pub days: BTreeMap<String, Vec<ScheduleWindow>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub windows: usize,
    pub total_slots: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    pub total_slots: usize,
    pub rules: Vec<AvailabilityRule>,
}

fn builder_from(days: &BTreeMap<String, Vec<ScheduleWindow>>) -> SlotResult<WeeklyScheduleBuilder> {
    let mut builder = WeeklyScheduleBuilder::new();
    for (key, windows) in days {
        let day = DayOfWeek::from_key(key)?;
        for window in windows {
            builder.add_window(day, window.clone());
        }
    }
    Ok(builder)
}

/// Validates a weekly schedule and reports how many slots it would offer
///
/// # Endpoint
///
/// ```text
/// POST /api/schedule/validate
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - unknown day key, empty schedule, inverted or
///   overlapping windows, non-positive duration
/// * `SlotError::InvalidTime` - a window time is not "HH:MM"
pub async fn validate_schedule(
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<ScheduleSummary>, AppError> {
    let builder = builder_from(&payload.days)?;
    builder.validate()?;

    let windows: usize = DayOfWeek::all().map(|day| builder.windows(day).len()).sum();
    let total_slots = builder.total_slots()?;
    debug!("Validated schedule: {} windows, {} slots", windows, total_slots);

    Ok(Json(ScheduleSummary {
        windows,
        total_slots,
    }))
}

/// Converts a weekly schedule into availability rules for one clinician and centre
///
/// # Endpoint
///
/// ```text
/// POST /api/schedule/build
/// ```
pub async fn build_schedule(
    Json(payload): Json<BuildRequest>,
) -> Result<Json<BuildResponse>, AppError> {
    let builder = builder_from(&payload.days)?;
    let rules = builder.build(payload.clinician_id, payload.centre_id)?;
    let total_slots = builder.total_slots()?;

    debug!(
        "Built {} rules for clinician {} at centre {}",
        rules.len(),
        payload.clinician_id,
        payload.centre_id
    );

    Ok(Json(BuildResponse { total_slots, rules }))
}
