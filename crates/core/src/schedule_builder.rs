//! Weekly availability editing: a clinician's windows grouped per day, turned
//! into [`AvailabilityRule`]s once validated.
//!
//! Days are always the integer 0-6 (Sunday = 0). Form keys such as "monday"
//! or "mon" are converted with [`DayOfWeek::from_key`] on the way in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    models::{AvailabilityRule, ConsultationMode},
    slots::calculate_slot_count,
    time::minutes_since_midnight,
};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: DayOfWeek = DayOfWeek(0);
    pub const MONDAY: DayOfWeek = DayOfWeek(1);
    pub const TUESDAY: DayOfWeek = DayOfWeek(2);
    pub const WEDNESDAY: DayOfWeek = DayOfWeek(3);
    pub const THURSDAY: DayOfWeek = DayOfWeek(4);
    pub const FRIDAY: DayOfWeek = DayOfWeek(5);
    pub const SATURDAY: DayOfWeek = DayOfWeek(6);

    pub fn new(index: u8) -> SlotResult<Self> {
        if index > 6 {
            return Err(SlotError::Validation(format!(
                "day of week must be between 0 and 6, got {}",
                index
            )));
        }
        Ok(Self(index))
    }

    /// Accepts "monday", "Mon" or "1" style keys.
    pub fn from_key(key: &str) -> SlotResult<Self> {
        let key = key.trim().to_ascii_lowercase();

        if let Ok(index) = key.parse::<u8>() {
            return Self::new(index);
        }

        DAY_NAMES
            .iter()
            .position(|name| {
                let name = name.to_ascii_lowercase();
                key == name || (key.len() == 3 && name.starts_with(&key))
            })
            .map(|index| Self(index as u8))
            .ok_or_else(|| SlotError::Validation(format!("unknown day of week: {:?}", key)))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        DAY_NAMES[self.0 as usize]
    }

    pub fn all() -> impl Iterator<Item = DayOfWeek> {
        (0..7).map(DayOfWeek)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = SlotError;

    fn try_from(index: u8) -> SlotResult<Self> {
        Self::new(index)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWindow {
    pub start_time: String,
    pub end_time: String,
    pub slot_duration_minutes: i32,
    pub mode: ConsultationMode,
}

impl ScheduleWindow {
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        slot_duration_minutes: i32,
        mode: ConsultationMode,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            slot_duration_minutes,
            mode,
        }
    }

    fn bounds(&self) -> SlotResult<(u32, u32)> {
        Ok((
            minutes_since_midnight(&self.start_time)?,
            minutes_since_midnight(&self.end_time)?,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyScheduleBuilder {
    days: BTreeMap<DayOfWeek, Vec<ScheduleWindow>>,
}

impl WeeklyScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads existing rules for editing. Centre and clinician are dropped; they
    /// are supplied again on [`build`](Self::build).
    pub fn from_rules(rules: &[AvailabilityRule]) -> SlotResult<Self> {
        let mut builder = Self::new();
        for rule in rules {
            builder.add_window(
                DayOfWeek::new(rule.day_of_week)?,
                ScheduleWindow::new(
                    rule.start_time.clone(),
                    rule.end_time.clone(),
                    rule.slot_duration_minutes,
                    rule.mode,
                ),
            );
        }
        Ok(builder)
    }

    pub fn add_window(&mut self, day: DayOfWeek, window: ScheduleWindow) -> &mut Self {
        self.days.entry(day).or_default().push(window);
        self
    }

    pub fn remove_window(&mut self, day: DayOfWeek, index: usize) -> Option<ScheduleWindow> {
        let windows = self.days.get_mut(&day)?;
        if index >= windows.len() {
            return None;
        }
        let removed = windows.remove(index);
        if windows.is_empty() {
            self.days.remove(&day);
        }
        Some(removed)
    }

    pub fn clear_day(&mut self, day: DayOfWeek) {
        self.days.remove(&day);
    }

    pub fn windows(&self, day: DayOfWeek) -> &[ScheduleWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Slots the whole week would offer once expanded.
    pub fn total_slots(&self) -> SlotResult<usize> {
        let mut total = 0;
        for window in self.days.values().flatten() {
            total += calculate_slot_count(
                &window.start_time,
                &window.end_time,
                window.slot_duration_minutes,
            )?;
        }
        Ok(total)
    }

    pub fn validate(&self) -> SlotResult<()> {
        if self.is_empty() {
            return Err(SlotError::Validation(
                "at least one availability window is required".to_string(),
            ));
        }

        for (day, windows) in &self.days {
            let mut bounds = Vec::with_capacity(windows.len());
            for window in windows {
                let (start, end) = window.bounds()?;
                if start >= end {
                    return Err(SlotError::Validation(format!(
                        "{}: start time {} must be before end time {}",
                        day, window.start_time, window.end_time
                    )));
                }
                if window.slot_duration_minutes <= 0 {
                    return Err(SlotError::Validation(format!(
                        "{}: slot duration must be positive",
                        day
                    )));
                }
                bounds.push((start, end, window));
            }

            bounds.sort_by_key(|(start, _, _)| *start);
            for pair in bounds.windows(2) {
                let (_, previous_end, previous) = pair[0];
                let (next_start, _, next) = pair[1];
                if next_start < previous_end {
                    return Err(SlotError::Validation(format!(
                        "{}: window {}-{} overlaps {}-{}",
                        day, previous.start_time, previous.end_time, next.start_time, next.end_time
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validates and emits one rule per window, ordered by day then start time.
    pub fn build(&self, clinician_id: Uuid, centre_id: Uuid) -> SlotResult<Vec<AvailabilityRule>> {
        self.validate()?;

        let mut rules = Vec::new();
        for (day, windows) in &self.days {
            let mut ordered: Vec<&ScheduleWindow> = windows.iter().collect();
            ordered.sort_by(|a, b| a.start_time.cmp(&b.start_time));

            rules.extend(ordered.into_iter().map(|window| AvailabilityRule {
                id: Uuid::new_v4(),
                clinician_id,
                centre_id,
                day_of_week: day.index(),
                start_time: window.start_time.clone(),
                end_time: window.end_time.clone(),
                slot_duration_minutes: window.slot_duration_minutes,
                mode: window.mode,
            }));
        }

        Ok(rules)
    }
}
