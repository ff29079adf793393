//! Day selection for each recurrence frequency.
//!
//! Each function pairs every selected local day in the range with every time
//! slot configured for it. Nothing here looks at absolute time; the caller
//! attaches the offset and applies the window.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use classbook_rfc::recur::expand_rrule;
use uuid::Uuid;

use super::calendar::{DayRange, days_between, months_between, on_stride, weeks_between};
use crate::model::{MonthDay, TimeSlot, Weekday, WeekdaySlots};

pub type DatedSlot = (NaiveDate, TimeSlot);

fn with_slots(day: NaiveDate, slots: &[TimeSlot]) -> impl Iterator<Item = DatedSlot> + '_ {
    slots.iter().map(move |slot| (day, *slot))
}

pub fn daily(
    anchor: NaiveDate,
    range: DayRange,
    interval: NonZeroU32,
    slots: &[TimeSlot],
) -> Vec<DatedSlot> {
    range
        .days()
        .filter(|day| on_stride(days_between(anchor, *day), interval))
        .flat_map(|day| with_slots(day, slots))
        .collect()
}

pub fn weekly(
    anchor: NaiveDate,
    range: DayRange,
    interval: NonZeroU32,
    by_weekday: &BTreeSet<Weekday>,
    slots: &WeekdaySlots,
) -> Vec<DatedSlot> {
    range
        .days()
        .filter(|day| by_weekday.contains(&Weekday::of(*day)))
        .filter(|day| on_stride(weeks_between(anchor, *day), interval))
        .flat_map(|day| with_slots(day, slots.get(Weekday::of(day))))
        .collect()
}

pub fn monthly(
    anchor: NaiveDate,
    range: DayRange,
    interval: NonZeroU32,
    by_month_day: &BTreeSet<MonthDay>,
    slots: &[TimeSlot],
) -> Vec<DatedSlot> {
    range
        .months()
        .filter(|month| on_stride(months_between(anchor, *month), interval))
        .flat_map(|month| {
            // Days the month does not have are skipped, never rolled over
            by_month_day
                .iter()
                .filter_map(move |day| day.in_month(month.year(), month.month()))
        })
        .filter(|date| range.contains(*date))
        .flat_map(|date| with_slots(date, slots))
        .collect()
}

/// Dates come from the RRULE evaluator. A rule that fails to evaluate is logged
/// and yields no dates; the error is not returned.
pub fn custom(
    class_id: Uuid,
    rrule: &str,
    dtstart: NaiveDateTime,
    range: DayRange,
    slots: &[TimeSlot],
) -> Vec<DatedSlot> {
    match expand_rrule(rrule, dtstart, range.first(), range.last()) {
        Ok(dates) => dates
            .into_iter()
            .flat_map(|date| with_slots(date, slots))
            .collect(),
        Err(err) => {
            tracing::warn!(
                %class_id,
                rrule,
                error = %err,
                "Custom recurrence rule could not be evaluated; class contributes no occurrences"
            );
            Vec::new()
        }
    }
}
