//! Whole-calendar-unit arithmetic on local dates.
//!
//! Indices are counted in calendar days, Sunday-aligned weeks and months, never
//! by dividing elapsed seconds, so a stride of "every 2 weeks" or "every 3rd
//! month" is unaffected by month lengths or offset changes.

use std::num::NonZeroU32;

use chrono::{Datelike, Days, Months, NaiveDate};

/// An inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DayRange {
    pub const fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    pub const fn first(self) -> NaiveDate {
        self.first
    }

    pub const fn last(self) -> NaiveDate {
        self.last
    }

    pub fn contains(self, day: NaiveDate) -> bool {
        (self.first..=self.last).contains(&day)
    }

    /// Every day from `first` through `last`.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take_while(move |day| *day <= self.last)
    }

    /// The first day of every month touched by the range, in order.
    pub fn months(self) -> impl Iterator<Item = NaiveDate> {
        std::iter::successors(self.first.with_day(1), |month| {
            month.checked_add_months(Months::new(1))
        })
        .take_while(move |month| *month <= self.last)
    }
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// The Sunday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_sunday())))
        .unwrap_or(day)
}

pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    days_between(week_start(from), week_start(to)).div_euclid(7)
}

pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    years * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Whether a unit index lands on the pattern's stride: non-negative and a
/// multiple of `interval`.
pub fn on_stride(index: i64, interval: NonZeroU32) -> bool {
    index >= 0 && index % i64::from(interval.get()) == 0
}
