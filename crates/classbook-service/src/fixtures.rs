//! Builders shared by unit tests.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::model::{
    ClassDefinition, ClassSchedule, MonthDay, QueryWindow, RecurrencePattern, TimeSlot, Weekday,
    WeekdaySlots,
};

pub fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("valid timestamp")
}

pub fn window(from: &str, to: &str) -> QueryWindow {
    QueryWindow::new(at(from), at(to)).expect("valid window")
}

pub fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).expect("valid slot")
}

pub fn class(name: &str, schedule: ClassSchedule) -> ClassDefinition {
    ClassDefinition {
        id: Uuid::new_v4(),
        name: name.to_string(),
        instructor_id: Uuid::new_v4(),
        room_id: Uuid::new_v4(),
        branch_id: Uuid::new_v4(),
        duration_minutes: 60,
        capacity: 12,
        waitlist_capacity: 3,
        allow_drop_in: false,
        instructor_name: None,
        room_name: None,
        branch_name: None,
        schedule,
    }
}

pub fn single(name: &str, start_at: &str, end_at: &str) -> ClassDefinition {
    class(
        name,
        ClassSchedule::Single {
            start_at: at(start_at),
            end_at: at(end_at),
        },
    )
}

pub fn recurring(
    name: &str,
    dtstart: &str,
    until: Option<&str>,
    pattern: RecurrencePattern,
) -> ClassDefinition {
    class(
        name,
        ClassSchedule::Recurring {
            dtstart: at(dtstart),
            until: until.map(at),
            pattern,
        },
    )
}

fn interval(value: u32) -> std::num::NonZeroU32 {
    std::num::NonZeroU32::new(value).expect("non-zero interval")
}

pub fn daily(every: u32, time_slots: Vec<TimeSlot>) -> RecurrencePattern {
    RecurrencePattern::Daily {
        interval: interval(every),
        time_slots,
    }
}

pub fn weekly(every: u32, by_day: &[(u8, Vec<TimeSlot>)]) -> RecurrencePattern {
    let by_weekday = by_day
        .iter()
        .map(|(code, _)| Weekday::new(*code).expect("valid weekday"))
        .collect();
    let time_slots_by_weekday = by_day
        .iter()
        .fold(WeekdaySlots::default(), |table, (code, slots)| {
            table.with(Weekday::new(*code).expect("valid weekday"), slots.clone())
        });
    RecurrencePattern::Weekly {
        interval: interval(every),
        by_weekday,
        time_slots_by_weekday,
    }
}

pub fn monthly(every: u32, days: &[u8], time_slots: Vec<TimeSlot>) -> RecurrencePattern {
    RecurrencePattern::Monthly {
        interval: interval(every),
        by_month_day: days
            .iter()
            .map(|day| MonthDay::new(*day).expect("valid month day"))
            .collect(),
        time_slots,
    }
}

pub fn custom(rrule: &str, time_slots: Vec<TimeSlot>) -> RecurrencePattern {
    RecurrencePattern::Custom {
        rrule: rrule.to_string(),
        time_slots,
    }
}

pub fn starts(occurrences: &[crate::model::Occurrence]) -> Vec<String> {
    occurrences
        .iter()
        .map(|occurrence| occurrence.start_at.to_rfc3339())
        .collect()
}
