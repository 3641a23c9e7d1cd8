//! Expansion of weekly availability rules into dated slots, past-slot
//! classification and per-date grouping.
//!
//! Everything here is pure and deterministic: the same rule and date always
//! produce the same ordered slot list.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::{
    errors::{SlotError, SlotResult},
    models::{AvailabilityRule, SlotDescriptor, SlotStatus, TimeSlot},
    time::{format_minutes, minutes_since_midnight, parse_time},
};

/// Anything that belongs to a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for TimeSlot {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for SlotDescriptor {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Minute-of-day bounds and step of a window that can hold at least zero slots.
///
/// `None` when the duration is not positive or the window is empty; both cases
/// expand to no slots.
struct SlotWindow {
    start: u32,
    end: u32,
    step: u32,
}

impl SlotWindow {
    fn new(start_time: &str, end_time: &str, duration_minutes: i32) -> SlotResult<Option<Self>> {
        let start = minutes_since_midnight(start_time)?;
        let end = minutes_since_midnight(end_time)?;

        if duration_minutes <= 0 || start >= end {
            return Ok(None);
        }

        Ok(Some(Self {
            start,
            end,
            step: duration_minutes as u32,
        }))
    }

    fn count(&self) -> usize {
        ((self.end - self.start) / self.step) as usize
    }

    /// Start offsets of every full slot. A trailing remainder shorter than
    /// `step` is dropped.
    fn starts(&self) -> impl Iterator<Item = u32> + '_ {
        (self.start..)
            .step_by(self.step as usize)
            .take_while(|cursor| cursor + self.step <= self.end)
    }
}

/// Slices `rule`'s window on `date` into consecutive fixed-length slots.
///
/// The date's weekday is not checked against `rule.day_of_week`; see
/// [`expand_rules`] for weekday-aware expansion over a date range.
pub fn generate_slots(rule: &AvailabilityRule, date: NaiveDate) -> SlotResult<Vec<SlotDescriptor>> {
    let window = SlotWindow::new(&rule.start_time, &rule.end_time, rule.slot_duration_minutes)?;
    let Some(window) = window else {
        return Ok(Vec::new());
    };

    let slots = window
        .starts()
        .map(|cursor| SlotDescriptor {
            clinician_id: rule.clinician_id,
            centre_id: rule.centre_id,
            date,
            start_time: format_minutes(cursor),
            end_time: format_minutes(cursor + window.step),
            duration: rule.slot_duration_minutes,
            mode: rule.mode,
        })
        .collect();

    Ok(slots)
}

/// Number of slots [`generate_slots`] produces for the same window.
pub fn calculate_slot_count(
    start_time: &str,
    end_time: &str,
    duration_minutes: i32,
) -> SlotResult<usize> {
    Ok(SlotWindow::new(start_time, end_time, duration_minutes)?
        .map(|window| window.count())
        .unwrap_or(0))
}

/// Expands every rule over the inclusive date range `from..=to`, applying each
/// rule only on dates whose weekday (Sunday = 0) matches its `day_of_week`.
///
/// The result is ordered by date, then start time. Slots from different rules
/// starting at the same time keep the rules' input order.
pub fn expand_rules(
    rules: &[AvailabilityRule],
    from: NaiveDate,
    to: NaiveDate,
) -> SlotResult<Vec<SlotDescriptor>> {
    if from > to {
        return Err(SlotError::Validation(format!(
            "range start {} is after range end {}",
            from, to
        )));
    }

    let mut expanded = Vec::new();
    for date in from.iter_days().take_while(|date| *date <= to) {
        let weekday = date.weekday().num_days_from_sunday() as u8;

        let mut day_slots = Vec::new();
        for rule in rules.iter().filter(|rule| rule.day_of_week == weekday) {
            day_slots.extend(generate_slots(rule, date)?);
        }
        day_slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        expanded.extend(day_slots);
    }

    Ok(expanded)
}

/// Whether a slot starting at `start_time` on `date` began strictly before `now`.
///
/// Date and time are naive local wall-clock values; no timezone conversion is
/// applied. Every calendar view relies on this same comparison.
pub fn is_past(date: NaiveDate, start_time: &str, now: NaiveDateTime) -> SlotResult<bool> {
    let start = date.and_time(parse_time(start_time)?);
    Ok(start < now)
}

/// The machine's current local wall-clock time, for callers with no pinned `now`.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Buckets slots by date. Each bucket keeps the input's relative order.
pub fn group_by_date<T: Dated + Clone>(slots: &[T]) -> BTreeMap<NaiveDate, Vec<T>> {
    let mut groups: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for slot in slots {
        groups.entry(slot.date()).or_default().push(slot.clone());
    }
    groups
}

pub fn filter_by_status(slots: &[TimeSlot], status: SlotStatus) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| slot.status == status)
        .cloned()
        .collect()
}

pub fn filter_available(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    filter_by_status(slots, SlotStatus::Available)
}
