use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecurrencePattern;
use crate::error::{ServiceError, ServiceResult};

/// A bookable class as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub id: Uuid,
    pub name: String,
    pub instructor_id: Uuid,
    pub room_id: Uuid,
    pub branch_id: Uuid,
    pub duration_minutes: u32,
    pub capacity: u32,
    pub waitlist_capacity: u32,
    pub allow_drop_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(flatten)]
    pub schedule: ClassSchedule,
}

/// When a class takes place, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassSchedule {
    #[serde(rename_all = "camelCase")]
    Single {
        start_at: DateTime<FixedOffset>,
        end_at: DateTime<FixedOffset>,
    },

    #[serde(rename_all = "camelCase")]
    Recurring {
        dtstart: DateTime<FixedOffset>,
        #[serde(default)]
        until: Option<DateTime<FixedOffset>>,
        pattern: RecurrencePattern,
    },
}

impl ClassDefinition {
    /// ## Summary
    /// Checks the invariants of a class definition: a single class ends after it
    /// starts, and a recurring class's `until` (if any) is after its `dtstart`.
    ///
    /// Time slots and weekday/month-day codes are already checked when the
    /// values are constructed.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` describing the first violation.
    pub fn validate(&self) -> ServiceResult<()> {
        match &self.schedule {
            ClassSchedule::Single { start_at, end_at } if start_at >= end_at => {
                Err(ServiceError::ValidationError(format!(
                    "class {} ends at {} which is not after its start {}",
                    self.id,
                    end_at.to_rfc3339(),
                    start_at.to_rfc3339()
                )))
            }
            ClassSchedule::Recurring {
                dtstart,
                until: Some(until),
                ..
            } if until <= dtstart => Err(ServiceError::ValidationError(format!(
                "class {} recurs until {} which is not after its start {}",
                self.id,
                until.to_rfc3339(),
                dtstart.to_rfc3339()
            ))),
            ClassSchedule::Recurring {
                pattern: RecurrencePattern::Custom { rrule, .. },
                ..
            } if rrule.trim().is_empty() => Err(ServiceError::ValidationError(format!(
                "class {} has an empty custom recurrence rule",
                self.id
            ))),
            ClassSchedule::Single { .. } | ClassSchedule::Recurring { .. } => Ok(()),
        }
    }
}
