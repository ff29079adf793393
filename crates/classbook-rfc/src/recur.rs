//! Evaluation of `RRULE` value strings (RFC 5545 §3.3.10) over a date range.
//!
//! The rule is anchored at a floating local `DTSTART`: the caller's local
//! wall-clock time is evaluated as if it were UTC, so the dates produced are
//! local calendar dates and no timezone database is consulted.
//!
//! A floating `UNTIL` (no `Z`) is read on the same wall-clock axis, and a
//! date-only `UNTIL` covers the whole of that day. A UTC `UNTIL` is compared
//! as-is against the floating instances.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use classbook_core::error::CoreError;
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use crate::error::{RfcError, RfcResult};

/// Instances pulled per evaluation pass. Expansion resumes after the last
/// date seen until the range is covered, so this bounds memory, not results.
const BATCH_SIZE: u16 = u16::MAX;

const UNTIL_DATE_FORMAT: &str = "%Y%m%d";
const UNTIL_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// ## Summary
/// Parses an `RRULE` value string and anchors it at `dtstart`.
///
/// A leading `RRULE:` property name is accepted and ignored.
///
/// ## Errors
/// Returns `RfcError::ParseError` if the rule text is malformed, or
/// `RfcError::RRuleError` if the rule is inconsistent with `dtstart`.
pub fn parse_rule(rule: &str, dtstart: NaiveDateTime) -> RfcResult<RRuleSet> {
    let text = rule.trim();
    let text = text.strip_prefix("RRULE:").unwrap_or(text);
    let (text, floating_until) = split_floating_until(text)?;

    let mut rrule = text
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| RfcError::ParseError(err.to_string()))?;
    if let Some(until) = floating_until {
        rrule = rrule.until(floating(until));
    }

    let rrule_set = rrule.build(floating(dtstart))?;
    tracing::trace!(rrule = %text, dtstart = %dtstart, ?floating_until, "Parsed RRULE");

    Ok(rrule_set)
}

/// ## Summary
/// Returns every local date on which `rule`, anchored at `dtstart`, produces an
/// instance within `[from, to]` (both ends inclusive).
///
/// Dates are ascending and unique; a rule that fires several times on one day
/// yields that day once. High-frequency rules are evaluated in batches, each
/// resuming on the day after the last date found, so no date in the range is
/// dropped however many instances a day holds.
///
/// ## Errors
/// Returns an error if the rule cannot be parsed or validated, or if
/// `from` is after `to`.
pub fn expand_rrule(
    rule: &str,
    dtstart: NaiveDateTime,
    from: NaiveDate,
    to: NaiveDate,
) -> RfcResult<Vec<NaiveDate>> {
    if from > to {
        return Err(CoreError::InvalidInput(format!(
            "recurrence range start {from} is after end {to}"
        ))
        .into());
    }

    let rrule_set = parse_rule(rule, dtstart)?;

    // Widen by a day on each side so the bounds' own inclusivity never matters;
    // the exact range is applied on the resulting dates below.
    let mut after = start_of_day(from)
        .checked_sub_signed(TimeDelta::days(1))
        .unwrap_or_else(|| start_of_day(from));
    let before = start_of_day(to)
        .checked_add_signed(TimeDelta::days(2))
        .unwrap_or_else(|| start_of_day(to));

    let mut dates: Vec<NaiveDate> = Vec::new();
    loop {
        let result = rrule_set
            .clone()
            .after(floating(after))
            .before(floating(before))
            .all(BATCH_SIZE);

        let Some(last) = result.dates.last().map(DateTime::date_naive) else {
            if result.limited {
                tracing::warn!(
                    rrule = %rule,
                    after = %after,
                    "RRULE evaluation hit the iteration limit without producing dates"
                );
            }
            break;
        };
        dates.extend(
            result
                .dates
                .iter()
                .map(DateTime::date_naive)
                .filter(|date| (from..=to).contains(date)),
        );

        if !result.limited || last >= to {
            break;
        }
        // Every instance on `last` maps to a date already recorded
        match last.succ_opt() {
            Some(next) => after = start_of_day(next),
            None => break,
        }
        tracing::trace!(resume = %after, "Resuming RRULE evaluation");
    }
    dates.dedup();

    tracing::trace!(count = dates.len(), %from, %to, "Expanded RRULE dates");
    Ok(dates)
}

/// Removes a floating or date-only `UNTIL` part from the rule text and returns
/// it as a local wall-clock value. A UTC `UNTIL` is left in place.
fn split_floating_until(text: &str) -> RfcResult<(String, Option<NaiveDateTime>)> {
    let mut until = None;
    let mut parts = Vec::new();

    for part in text.split(';') {
        let floating_value = part
            .split_once('=')
            .filter(|(name, value)| {
                name.trim().eq_ignore_ascii_case("UNTIL")
                    && !value.trim().to_ascii_uppercase().ends_with('Z')
            })
            .map(|(_, value)| value.trim());

        match floating_value {
            Some(value) => until = Some(parse_floating_until(value)?),
            None => parts.push(part),
        }
    }

    Ok((parts.join(";"), until))
}

fn parse_floating_until(value: &str) -> RfcResult<NaiveDateTime> {
    if !value.contains('T') {
        // `YYYYMMDD`: the whole day is included
        return NaiveDate::parse_from_str(value, UNTIL_DATE_FORMAT)
            .map_err(|err| RfcError::ParseError(format!("invalid UNTIL date {value:?}: {err}")))?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| RfcError::ParseError(format!("invalid UNTIL date {value:?}")));
    }
    NaiveDateTime::parse_from_str(value, UNTIL_DATE_TIME_FORMAT)
        .map_err(|err| RfcError::ParseError(format!("invalid UNTIL {value:?}: {err}")))
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn floating(local: NaiveDateTime) -> DateTime<Tz> {
    local.and_utc().with_timezone(&Tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn anchor(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        date(year, month, day)
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    #[test_log::test]
    fn test_weekly_byday_within_range() {
        // 2024-01-01 is a Monday
        let dates = expand_rrule(
            "FREQ=WEEKLY;BYDAY=MO,WE,FR",
            anchor(2024, 1, 1, 9),
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .expect("valid rule");

        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5)]);
    }

    #[test]
    fn test_range_end_is_inclusive() {
        let dates = expand_rrule(
            "FREQ=DAILY;INTERVAL=2",
            anchor(2024, 1, 1, 9),
            date(2024, 1, 2),
            date(2024, 1, 5),
        )
        .expect("valid rule");

        assert_eq!(dates, vec![date(2024, 1, 3), date(2024, 1, 5)]);
    }

    #[test]
    fn test_property_prefix_is_accepted() {
        let dates = expand_rrule(
            "RRULE:FREQ=DAILY;COUNT=3",
            anchor(2024, 1, 1, 18),
            date(2024, 1, 1),
            date(2024, 1, 31),
        )
        .expect("valid rule");

        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
    }

    #[test]
    fn test_late_evening_anchor_stays_on_local_date() {
        // 23:30 local must not spill into the following day
        let dates = expand_rrule(
            "FREQ=DAILY;COUNT=2",
            date(2024, 3, 9).and_hms_opt(23, 30, 0).expect("valid time"),
            date(2024, 3, 1),
            date(2024, 3, 31),
        )
        .expect("valid rule");

        assert_eq!(dates, vec![date(2024, 3, 9), date(2024, 3, 10)]);
    }

    #[test]
    fn test_hourly_rule_yields_each_day_once() {
        let dates = expand_rrule(
            "FREQ=HOURLY;INTERVAL=6",
            anchor(2024, 1, 1, 0),
            date(2024, 1, 1),
            date(2024, 1, 2),
        )
        .expect("valid rule");

        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
    }

    #[test]
    fn test_malformed_rule_is_parse_error() {
        let err = expand_rrule(
            "FREQ=SOMETIMES",
            anchor(2024, 1, 1, 9),
            date(2024, 1, 1),
            date(2024, 1, 7),
        )
        .expect_err("malformed rule");

        assert!(matches!(err, RfcError::ParseError(_)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = expand_rrule(
            "FREQ=DAILY",
            anchor(2024, 1, 1, 9),
            date(2024, 1, 7),
            date(2024, 1, 1),
        )
        .expect_err("inverted range");

        assert!(matches!(err, RfcError::CoreError(CoreError::InvalidInput(_))));
    }

    fn mondays_in_january() -> Vec<NaiveDate> {
        vec![
            date(2024, 1, 1),
            date(2024, 1, 8),
            date(2024, 1, 15),
            date(2024, 1, 22),
            date(2024, 1, 29),
        ]
    }

    fn expand_mondays(rule: &str) -> RfcResult<Vec<NaiveDate>> {
        expand_rrule(rule, anchor(2024, 1, 1, 9), date(2024, 1, 1), date(2024, 3, 31))
    }

    #[test_log::test]
    fn test_utc_until() {
        let dates = expand_mondays("FREQ=WEEKLY;BYDAY=MO;UNTIL=20240201T000000Z").expect("valid rule");

        assert_eq!(dates, mondays_in_january());
    }

    #[test_log::test]
    fn test_floating_until() {
        let dates = expand_mondays("FREQ=WEEKLY;BYDAY=MO;UNTIL=20240201T000000").expect("valid rule");

        assert_eq!(dates, mondays_in_january());
    }

    #[test]
    fn test_floating_until_is_inclusive() {
        let dates = expand_mondays("FREQ=WEEKLY;BYDAY=MO;UNTIL=20240129T090000").expect("valid rule");

        assert_eq!(dates, mondays_in_january());
    }

    #[test_log::test]
    fn test_date_only_until_covers_the_whole_day() {
        // the last instance is at 09:00 on the UNTIL date
        let dates = expand_mondays("RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20240129").expect("valid rule");

        assert_eq!(dates, mondays_in_january());
    }

    #[test]
    fn test_malformed_until_is_parse_error() {
        let err = expand_mondays("FREQ=WEEKLY;BYDAY=MO;UNTIL=2024-02-01").expect_err("bad UNTIL");

        assert!(matches!(err, RfcError::ParseError(_)));
    }

    #[test]
    fn test_until_before_dtstart_is_rejected() {
        let err = expand_mondays("FREQ=DAILY;UNTIL=20231201").expect_err("UNTIL before DTSTART");

        assert!(matches!(err, RfcError::RRuleError(_)));
    }

    #[test_log::test]
    fn test_minutely_rule_covers_every_day_of_the_range() {
        let dates = expand_rrule(
            "FREQ=MINUTELY",
            anchor(2024, 1, 1, 0),
            date(2024, 1, 1),
            date(2024, 3, 31),
        )
        .expect("valid rule");

        assert_eq!(dates.len(), 91);
        assert_eq!(dates.first(), Some(&date(2024, 1, 1)));
        assert_eq!(dates.last(), Some(&date(2024, 3, 31)));
        assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
    }
}
