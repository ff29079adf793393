//! Same-day local start/end time pairs.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use classbook_core::constants::TIME_OF_DAY_FORMAT;
use classbook_core::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A local time-of-day range within a single day. `start` is always before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotRepr", into = "TimeSlotRepr")]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotRepr {
    start_time: String,
    end_time: String,
}

impl TimeSlot {
    /// ## Summary
    /// Creates a time slot from local start and end times.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::ValidationError(format!(
                "time slot start {} must be before end {}",
                start.format(TIME_OF_DAY_FORMAT),
                end.format(TIME_OF_DAY_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// Creates a time slot from two `HH:mm` strings.
    ///
    /// ## Errors
    /// Returns an error if either string is not a zero-padded 24-hour `HH:mm`
    /// time or if the start is not before the end.
    pub fn parse(start: &str, end: &str) -> CoreResult<Self> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Attaches this slot to a local calendar day in the given offset.
    #[must_use]
    pub fn on(
        &self,
        day: NaiveDate,
        offset: FixedOffset,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = day.and_time(self.start).and_local_timezone(offset).single()?;
        let end = day.and_time(self.end).and_local_timezone(offset).single()?;
        Some((start, end))
    }
}

fn parse_time_of_day(value: &str) -> CoreResult<NaiveTime> {
    // chrono accepts unpadded hours, the wire format does not
    let parsed = if value.len() == 5 {
        NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT).ok()
    } else {
        None
    };
    parsed.ok_or_else(|| CoreError::ValidationError(format!("invalid time of day: {value:?}")))
}

impl TryFrom<TimeSlotRepr> for TimeSlot {
    type Error = CoreError;

    fn try_from(repr: TimeSlotRepr) -> CoreResult<Self> {
        Self::parse(&repr.start_time, &repr.end_time)
    }
}

impl From<TimeSlot> for TimeSlotRepr {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start_time: slot.start.format(TIME_OF_DAY_FORMAT).to_string(),
            end_time: slot.end.format(TIME_OF_DAY_FORMAT).to_string(),
        }
    }
}
