//! Recurrence expansion: class definition + query window -> concrete occurrences.
//!
//! Recurring classes are expanded on naive local calendar days in the offset of
//! their `dtstart`. The days walked are clamped to `[max(from, dtstart),
//! min(to, until)]`, but generated occurrences are kept whenever they overlap
//! the caller's original window.
//!
//! Callers bound the window; expansion cost grows linearly with it.

mod calendar;
mod frequency;

use chrono::{DateTime, FixedOffset};

use self::calendar::DayRange;
use self::frequency::DatedSlot;
use crate::model::{ClassDefinition, ClassSchedule, Occurrence, QueryWindow, RecurrencePattern};

/// ## Summary
/// Produces every occurrence of `class` that overlaps `window`, sorted by start.
///
/// Pure and deterministic: identical inputs yield identical, identically ordered
/// output. Occurrences starting at the same instant keep generation order.
#[must_use]
pub fn expand(class: &ClassDefinition, window: &QueryWindow) -> Vec<Occurrence> {
    let mut occurrences = match &class.schedule {
        ClassSchedule::Single { start_at, end_at } => {
            if window.overlaps(*start_at, *end_at) {
                vec![Occurrence::of(class, *start_at, *end_at)]
            } else {
                Vec::new()
            }
        }
        ClassSchedule::Recurring {
            dtstart,
            until,
            pattern,
        } => expand_recurring(class, *dtstart, *until, pattern, window),
    };

    occurrences.sort_by_key(|occurrence| occurrence.start_at);

    tracing::trace!(
        class_id = %class.id,
        count = occurrences.len(),
        from = %window.start(),
        to = %window.end(),
        "Expanded class"
    );
    occurrences
}

fn expand_recurring(
    class: &ClassDefinition,
    dtstart: DateTime<FixedOffset>,
    until: Option<DateTime<FixedOffset>>,
    pattern: &RecurrencePattern,
    window: &QueryWindow,
) -> Vec<Occurrence> {
    let effective_start = window.start().max(dtstart);
    let effective_end = until.map_or(window.end(), |until| until.min(window.end()));
    if effective_start >= effective_end {
        tracing::trace!(class_id = %class.id, "Recurrence does not reach the window");
        return Vec::new();
    }

    let offset = *dtstart.offset();
    let anchor = dtstart.date_naive();
    let range = DayRange::new(
        effective_start.with_timezone(&offset).date_naive(),
        effective_end.with_timezone(&offset).date_naive(),
    );
    tracing::trace!(
        class_id = %class.id,
        freq = pattern.freq(),
        first = %range.first(),
        last = %range.last(),
        "Walking recurrence"
    );

    let dated: Vec<DatedSlot> = match pattern {
        RecurrencePattern::Daily {
            interval,
            time_slots,
        } => frequency::daily(anchor, range, *interval, time_slots),
        RecurrencePattern::Weekly {
            interval,
            by_weekday,
            time_slots_by_weekday,
        } => frequency::weekly(anchor, range, *interval, by_weekday, time_slots_by_weekday),
        RecurrencePattern::Monthly {
            interval,
            by_month_day,
            time_slots,
        } => frequency::monthly(anchor, range, *interval, by_month_day, time_slots),
        RecurrencePattern::Custom { rrule, time_slots } => frequency::custom(
            class.id,
            rrule,
            dtstart.naive_local(),
            range,
            time_slots,
        ),
    };

    dated
        .into_iter()
        .filter_map(|(day, slot)| slot.on(day, offset))
        .filter(|(start, end)| window.overlaps(*start, *end))
        .map(|(start, end)| Occurrence::of(class, start, end))
        .collect()
}
