//! Recurrence patterns, one variant per frequency.

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate};
use classbook_core::error::{CoreError, CoreResult};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::TimeSlot;

/// Day of the week encoded as `0..=6`, with 0 = Sunday.
///
/// Deserializes from either a number or a numeric string so that it can key
/// JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    /// ## Errors
    /// Returns `CoreError::ValidationError` if `code` is not in `0..=6`.
    pub fn new(code: u8) -> CoreResult<Self> {
        if code <= 6 {
            Ok(Self(code))
        } else {
            Err(CoreError::ValidationError(format!(
                "weekday must be 0-6 (0 = Sunday), got {code}"
            )))
        }
    }

    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::SUNDAY,
            chrono::Weekday::Mon => Self::MONDAY,
            chrono::Weekday::Tue => Self::TUESDAY,
            chrono::Weekday::Wed => Self::WEDNESDAY,
            chrono::Weekday::Thu => Self::THURSDAY,
            chrono::Weekday::Fri => Self::FRIDAY,
            chrono::Weekday::Sat => Self::SATURDAY,
        }
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.0
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WeekdayVisitor)
    }
}

struct WeekdayVisitor;

impl Visitor<'_> for WeekdayVisitor {
    type Value = Weekday;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a weekday code from 0 (Sunday) to 6")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Weekday, E> {
        let code = u8::try_from(value)
            .map_err(|err| E::custom(format!("weekday code {value} out of range: {err}")))?;
        Weekday::new(code).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Weekday, E> {
        let code = u64::try_from(value)
            .map_err(|err| E::custom(format!("weekday code {value} out of range: {err}")))?;
        self.visit_u64(code)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Weekday, E> {
        let code = value
            .trim()
            .parse::<u64>()
            .map_err(|err| E::custom(format!("invalid weekday key {value:?}: {err}")))?;
        self.visit_u64(code)
    }
}

/// Day of the month encoded as `1..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthDay(u8);

impl MonthDay {
    /// ## Errors
    /// Returns `CoreError::ValidationError` if `day` is not in `1..=31`.
    pub fn new(day: u8) -> CoreResult<Self> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(CoreError::ValidationError(format!(
                "month day must be 1-31, got {day}"
            )))
        }
    }

    /// The date this day falls on in the given month, or `None` if the month is
    /// too short (day 31 in April, day 30 in February).
    #[must_use]
    pub fn in_month(self, year: i32, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, u32::from(self.0))
    }
}

impl TryFrom<u8> for MonthDay {
    type Error = CoreError;

    fn try_from(day: u8) -> CoreResult<Self> {
        Self::new(day)
    }
}

impl From<MonthDay> for u8 {
    fn from(day: MonthDay) -> Self {
        day.0
    }
}

/// Time slots for each day of the week, indexed by weekday code.
///
/// Serialized as an object keyed by weekday code, e.g. `{"1": [...], "3": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Weekday, Vec<TimeSlot>>",
    into = "BTreeMap<Weekday, Vec<TimeSlot>>"
)]
pub struct WeekdaySlots([Vec<TimeSlot>; 7]);

impl WeekdaySlots {
    /// Replaces the slots configured for `weekday`.
    #[must_use]
    pub fn with(mut self, weekday: Weekday, slots: Vec<TimeSlot>) -> Self {
        self.0[weekday.index()] = slots;
        self
    }

    /// Slots for `weekday`; empty when none were configured.
    #[must_use]
    pub fn get(&self, weekday: Weekday) -> &[TimeSlot] {
        &self.0[weekday.index()]
    }
}

impl From<BTreeMap<Weekday, Vec<TimeSlot>>> for WeekdaySlots {
    fn from(map: BTreeMap<Weekday, Vec<TimeSlot>>) -> Self {
        map.into_iter()
            .fold(Self::default(), |table, (weekday, slots)| {
                table.with(weekday, slots)
            })
    }
}

impl From<WeekdaySlots> for BTreeMap<Weekday, Vec<TimeSlot>> {
    fn from(table: WeekdaySlots) -> Self {
        (0u8..7)
            .map(Weekday)
            .zip(table.0)
            .filter(|(_, slots)| !slots.is_empty())
            .collect()
    }
}

const fn default_interval() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// How a recurring class repeats, tagged on `freq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "freq", rename_all = "lowercase")]
pub enum RecurrencePattern {
    /// Every `interval` days.
    #[serde(rename_all = "camelCase")]
    Daily {
        #[serde(default = "default_interval")]
        interval: NonZeroU32,
        time_slots: Vec<TimeSlot>,
    },

    /// On the listed weekdays of every `interval`-th Sunday-aligned week.
    #[serde(rename_all = "camelCase")]
    Weekly {
        #[serde(default = "default_interval")]
        interval: NonZeroU32,
        by_weekday: BTreeSet<Weekday>,
        #[serde(default)]
        time_slots_by_weekday: WeekdaySlots,
    },

    /// On the listed days of every `interval`-th month.
    #[serde(rename_all = "camelCase")]
    Monthly {
        #[serde(default = "default_interval")]
        interval: NonZeroU32,
        by_month_day: BTreeSet<MonthDay>,
        time_slots: Vec<TimeSlot>,
    },

    /// On the dates produced by an RFC 5545 `RRULE` value.
    #[serde(rename_all = "camelCase")]
    Custom {
        rrule: String,
        time_slots: Vec<TimeSlot>,
    },
}

impl RecurrencePattern {
    #[must_use]
    pub const fn freq(&self) -> &'static str {
        match self {
            Self::Daily { .. } => "daily",
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
            Self::Custom { .. } => "custom",
        }
    }
}
