use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ClassDefinition;
use crate::overlap::overlaps;

/// One concrete, time-bounded materialization of a class. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub class_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub start_at: DateTime<FixedOffset>,
    pub end_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

impl Occurrence {
    /// Builds an occurrence of `class`, copying its display names.
    #[must_use]
    pub fn of(
        class: &ClassDefinition,
        start_at: DateTime<FixedOffset>,
        end_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            class_id: class.id,
            class_name: Some(class.name.clone()),
            start_at,
            end_at,
            instructor_name: class.instructor_name.clone(),
            room_name: class.room_name.clone(),
            branch_name: class.branch_name.clone(),
        }
    }

    /// Half-open overlap with another occurrence; touching ends do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start_at, self.end_at, other.start_at, other.end_at)
    }
}
