// Shared expansion cases. The including module must have `ClassDefinition`,
// `QueryWindow` and `expand` in scope.

use chrono::{DateTime, FixedOffset};

pub struct ScheduleCase {
    pub name: &'static str,
    /// JSON object with the `type` and schedule fields of a class.
    pub schedule: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn schedule_cases() -> Vec<ScheduleCase> {
    vec![
        ScheduleCase {
            name: "daily_every_other_day",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "pattern": {
                    "freq": "daily",
                    "interval": 2,
                    "timeSlots": [{ "startTime": "09:00", "endTime": "10:00" }]
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-01-08T00:00:00Z",
            expected: &[
                "2024-01-01T09:00:00+00:00",
                "2024-01-03T09:00:00+00:00",
                "2024-01-05T09:00:00+00:00",
                "2024-01-07T09:00:00+00:00",
            ],
        },
        ScheduleCase {
            name: "weekly_monday_wednesday",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "until": null,
                "pattern": {
                    "freq": "weekly",
                    "interval": 1,
                    "byWeekday": [1, 3],
                    "timeSlotsByWeekday": {
                        "1": [{ "startTime": "09:00", "endTime": "10:00" }],
                        "3": [{ "startTime": "14:00", "endTime": "15:00" }]
                    }
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-01-15T00:00:00Z",
            expected: &[
                "2024-01-01T09:00:00+00:00",
                "2024-01-03T14:00:00+00:00",
                "2024-01-08T09:00:00+00:00",
                "2024-01-10T14:00:00+00:00",
            ],
        },
        ScheduleCase {
            name: "monthly_day_31_skips_short_months",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "pattern": {
                    "freq": "monthly",
                    "byMonthDay": [31],
                    "timeSlots": [{ "startTime": "09:00", "endTime": "10:00" }]
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-05-01T00:00:00Z",
            expected: &["2024-01-31T09:00:00+00:00", "2024-03-31T09:00:00+00:00"],
        },
        ScheduleCase {
            name: "monthly_every_third_month_across_year_end",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2023-11-15T00:00:00Z",
                "pattern": {
                    "freq": "monthly",
                    "interval": 3,
                    "byMonthDay": [15],
                    "timeSlots": [{ "startTime": "10:00", "endTime": "11:00" }]
                }
            }"#,
            from: "2023-11-01T00:00:00Z",
            to: "2024-06-01T00:00:00Z",
            expected: &[
                "2023-11-15T10:00:00+00:00",
                "2024-02-15T10:00:00+00:00",
                "2024-05-15T10:00:00+00:00",
            ],
        },
        ScheduleCase {
            name: "custom_first_monday",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "pattern": {
                    "freq": "custom",
                    "rrule": "FREQ=MONTHLY;BYDAY=1MO",
                    "timeSlots": [{ "startTime": "19:00", "endTime": "20:00" }]
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-04-01T00:00:00Z",
            expected: &[
                "2024-01-01T19:00:00+00:00",
                "2024-02-05T19:00:00+00:00",
                "2024-03-04T19:00:00+00:00",
            ],
        },
        ScheduleCase {
            name: "custom_date_only_until_includes_last_day",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "pattern": {
                    "freq": "custom",
                    "rrule": "FREQ=WEEKLY;BYDAY=MO;UNTIL=20240115",
                    "timeSlots": [{ "startTime": "18:00", "endTime": "19:00" }]
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-02-01T00:00:00Z",
            expected: &[
                "2024-01-01T18:00:00+00:00",
                "2024-01-08T18:00:00+00:00",
                "2024-01-15T18:00:00+00:00",
            ],
        },
        ScheduleCase {
            name: "custom_malformed_rule_is_empty",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-01-01T00:00:00Z",
                "pattern": {
                    "freq": "custom",
                    "rrule": "EVERY TUESDAY",
                    "timeSlots": [{ "startTime": "19:00", "endTime": "20:00" }]
                }
            }"#,
            from: "2024-01-01T00:00:00Z",
            to: "2024-04-01T00:00:00Z",
            expected: &[],
        },
        ScheduleCase {
            name: "fixed_offset_across_dst_date",
            schedule: r#"{
                "type": "recurring",
                "dtstart": "2024-03-09T20:00:00-05:00",
                "pattern": {
                    "freq": "daily",
                    "timeSlots": [{ "startTime": "21:00", "endTime": "22:00" }]
                }
            }"#,
            from: "2024-03-10T00:00:00Z",
            to: "2024-03-12T00:00:00Z",
            expected: &["2024-03-09T21:00:00-05:00", "2024-03-10T21:00:00-05:00"],
        },
        ScheduleCase {
            name: "single_inside_window",
            schedule: r#"{
                "type": "single",
                "startAt": "2024-03-01T10:00:00Z",
                "endAt": "2024-03-01T11:00:00Z"
            }"#,
            from: "2024-03-01T00:00:00Z",
            to: "2024-03-02T00:00:00Z",
            expected: &["2024-03-01T10:00:00+00:00"],
        },
        ScheduleCase {
            name: "single_ending_at_window_start",
            schedule: r#"{
                "type": "single",
                "startAt": "2024-02-29T23:00:00Z",
                "endAt": "2024-03-01T00:00:00Z"
            }"#,
            from: "2024-03-01T00:00:00Z",
            to: "2024-03-02T00:00:00Z",
            expected: &[],
        },
    ]
}

pub fn build_class(schedule: &str) -> ClassDefinition {
    let mut class = serde_json::json!({
        "id": "5d0c4f0e-2b8a-4a61-9d1e-7c3b2a1f0e9d",
        "name": "Case class",
        "instructorId": "b1e2d3c4-a5b6-4c7d-8e9f-0a1b2c3d4e5f",
        "roomId": "c1d2e3f4-a5b6-4c7d-8e9f-0a1b2c3d4e5f",
        "branchId": "d1e2f3a4-b5c6-4d7e-8f9a-0b1c2d3e4f5a",
        "durationMinutes": 60,
        "capacity": 10,
        "waitlistCapacity": 0,
        "allowDropIn": true
    });
    let schedule: serde_json::Value = serde_json::from_str(schedule)
        .unwrap_or_else(|err| panic!("Failed to parse schedule JSON: {err}"));
    if let (Some(target), Some(source)) = (class.as_object_mut(), schedule.as_object()) {
        target.extend(source.clone());
    }
    serde_json::from_value(class)
        .unwrap_or_else(|err| panic!("Failed to build class definition: {err}"))
}

pub fn assert_case(case: &ScheduleCase) {
    let class = build_class(case.schedule);
    let window = QueryWindow::new(parse_rfc3339(case.from), parse_rfc3339(case.to))
        .unwrap_or_else(|err| panic!("Invalid window in {}: {err}", case.name));

    let actual: Vec<String> = expand(&class, &window)
        .iter()
        .map(|occurrence| occurrence.start_at.to_rfc3339())
        .collect();

    assert_eq!(actual, case.expected, "Case {} did not match", case.name);
}

fn parse_rfc3339(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("Failed to parse rfc3339 value {value}: {err}"))
}
