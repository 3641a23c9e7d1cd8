//! # Slot Handlers
//!
//! Stateless previews of availability rule expansion. Calendars use these to
//! show what a rule will offer before it is saved, without asking the
//! booking system for resolved slots.
//!
//! A window that is not an exact multiple of the slot duration loses its
//! trailing remainder; a non-positive duration or an empty window yields an
//! empty list rather than an error. Malformed times are rejected with 400.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use clinicslots_core::{
    errors::SlotError,
    models::{AvailabilityRule, SlotDescriptor},
    slots::{calculate_slot_count, expand_rules, generate_slots},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

/// Body of `POST /api/slots/preview`
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The rule to slice
    pub rule: AvailabilityRule,
    /// The date to lay the rule's window on
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub count: usize,
    pub slots: Vec<SlotDescriptor>,
}

impl From<Vec<SlotDescriptor>> for SlotsResponse {
    fn from(slots: Vec<SlotDescriptor>) -> Self {
        Self {
            count: slots.len(),
            slots,
        }
    }
}

/// Body of `POST /api/slots/count`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRequest {
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Body of `POST /api/slots/expand`
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub rules: Vec<AvailabilityRule>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Slices one rule's window on a single date
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/preview
/// ```
pub async fn preview_slots(
    Json(payload): Json<PreviewRequest>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = generate_slots(&payload.rule, payload.date)?;
    debug!(
        "Previewed {} slots for rule {} on {}",
        slots.len(),
        payload.rule.id,
        payload.date
    );
    Ok(Json(slots.into()))
}

/// Closed-form slot count for a window
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/count
/// ```
pub async fn count_slots(
    Json(payload): Json<CountRequest>,
) -> Result<Json<CountResponse>, AppError> {
    let count = calculate_slot_count(
        &payload.start_time,
        &payload.end_time,
        payload.duration_minutes,
    )?;
    Ok(Json(CountResponse { count }))
}

/// Expands a set of weekly rules over an inclusive date range
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/expand
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - `from` is after `to`, or the range is longer
///   than the configured maximum
pub async fn expand_slots(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ExpandRequest>,
) -> Result<Json<SlotsResponse>, AppError> {
    let span_days = (payload.to - payload.from).num_days() + 1;
    if span_days > state.max_range_days {
        return Err(AppError(SlotError::Validation(format!(
            "date range covers {} days, at most {} are allowed",
            span_days, state.max_range_days
        ))));
    }

    let slots = expand_rules(&payload.rules, payload.from, payload.to)?;
    debug!(
        "Expanded {} rules into {} slots from {} to {}",
        payload.rules.len(),
        slots.len(),
        payload.from,
        payload.to
    );
    Ok(Json(slots.into()))
}
