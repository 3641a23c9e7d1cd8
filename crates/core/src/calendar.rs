//! View models for the month calendar, week view and per-day slot grid.
//!
//! These never own or modify slot data. They only derive indicators and
//! selectability from the aggregator's date buckets.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{SlotError, SlotResult},
    models::{SlotStatus, TimeSlot},
    slots::{group_by_date, is_past},
    time::format_time_range,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub has_slots: bool,
    pub has_available: bool,
    pub has_booked: bool,
    pub available_count: usize,
}

impl DayAvailability {
    pub fn from_slots(slots: &[TimeSlot]) -> Self {
        let available_count = slots.iter().filter(|slot| slot.is_available()).count();
        Self {
            has_slots: !slots.is_empty(),
            has_available: available_count > 0,
            has_booked: slots.iter().any(|slot| slot.status == SlotStatus::Booked),
            available_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub availability: DayAvailability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthView {
    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|cell| cell.date == date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: NaiveDate,
    pub availability: DayAvailability,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCard {
    pub slot: TimeSlot,
    pub label: String,
    pub selectable: bool,
}

impl SlotCard {
    /// Click dispatch: the slot is handed on only when it can be booked.
    pub fn select(&self) -> Option<&TimeSlot> {
        self.selectable.then_some(&self.slot)
    }
}

fn first_of_month(year: i32, month: u32) -> SlotResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SlotError::InvalidDate(format!("no such month: {}-{:02}", year, month)))
}

pub fn month_view(year: i32, month: u32, slots: &[TimeSlot]) -> SlotResult<MonthView> {
    let first = first_of_month(year, month)?;
    let groups = group_by_date(slots);

    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| DayCell {
            date,
            availability: groups
                .get(&date)
                .map(|bucket| DayAvailability::from_slots(bucket))
                .unwrap_or_default(),
        })
        .collect();

    Ok(MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> SlotResult<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset))
        .ok_or_else(|| SlotError::InvalidDate(format!("no Sunday on or before {}", date)))
}

/// First and last day (Sunday to Saturday) of the week containing `anchor`.
pub fn week_range(anchor: NaiveDate) -> SlotResult<(NaiveDate, NaiveDate)> {
    let start = week_start(anchor)?;
    let end = start.checked_add_days(Days::new(6)).ok_or_else(|| {
        SlotError::InvalidDate(format!("week of {} runs past the calendar", anchor))
    })?;
    Ok((start, end))
}

pub fn week_view(anchor: NaiveDate, slots: &[TimeSlot]) -> SlotResult<WeekView> {
    let (start, _) = week_range(anchor)?;
    let mut groups = group_by_date(slots);

    let days = start
        .iter_days()
        .take(7)
        .map(|date| {
            let bucket = groups.remove(&date).unwrap_or_default();
            DayColumn {
                date,
                availability: DayAvailability::from_slots(&bucket),
                slots: bucket,
            }
        })
        .collect();

    Ok(WeekView { start, days })
}

pub fn is_selectable(slot: &TimeSlot, now: NaiveDateTime) -> SlotResult<bool> {
    Ok(slot.is_available() && !is_past(slot.date, &slot.start_time, now)?)
}

/// One card per slot on `date`, in input order.
pub fn slot_grid(
    date: NaiveDate,
    slots: &[TimeSlot],
    now: NaiveDateTime,
) -> SlotResult<Vec<SlotCard>> {
    slots
        .iter()
        .filter(|slot| slot.date == date)
        .map(|slot| -> SlotResult<SlotCard> {
            Ok(SlotCard {
                label: format_time_range(&slot.start_time, &slot.end_time)?,
                selectable: is_selectable(slot, now)?,
                slot: slot.clone(),
            })
        })
        .collect()
}

/// The month currently shown by the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> SlotResult<Self> {
        Ok(Self {
            first: first_of_month(year, month)?,
        })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// Moves `months` forward (or backward when negative) in one step.
    pub fn shift(&self, months: i32) -> SlotResult<Self> {
        let step = Months::new(months.unsigned_abs());
        let first = if months >= 0 {
            self.first.checked_add_months(step)
        } else {
            self.first.checked_sub_months(step)
        };

        first
            .map(|first| Self { first })
            .ok_or_else(|| {
                SlotError::InvalidDate(format!(
                    "cannot move {} months from {}-{:02}",
                    months,
                    self.year(),
                    self.month()
                ))
            })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn view(&self, slots: &[TimeSlot]) -> SlotResult<MonthView> {
        month_view(self.year(), self.month(), slots)
    }
}
