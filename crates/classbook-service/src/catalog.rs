//! In-memory versions of the class lookups the persistence layer provides.
//!
//! Services backed by a database run these as indexed queries; the predicates
//! here define what those queries must return.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ClassDefinition;

/// Optional filters for listing classes. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassFilter {
    pub branch_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    /// Case-insensitive substring of the class name.
    pub name: Option<String>,
}

impl ClassFilter {
    #[must_use]
    pub fn matches(&self, class: &ClassDefinition) -> bool {
        self.branch_id.is_none_or(|id| id == class.branch_id)
            && self.instructor_id.is_none_or(|id| id == class.instructor_id)
            && self.room_id.is_none_or(|id| id == class.room_id)
            && self.name.as_deref().is_none_or(|needle| {
                class.name.to_lowercase().contains(&needle.to_lowercase())
            })
    }

    pub fn apply<'a>(
        &'a self,
        classes: &'a [ClassDefinition],
    ) -> impl Iterator<Item = &'a ClassDefinition> + 'a {
        classes.iter().filter(|class| self.matches(class))
    }
}

/// ## Summary
/// Whether `other` could collide with `candidate`: a different class in the
/// same branch that shares the instructor or the room.
#[must_use]
pub fn is_conflict_candidate(candidate: &ClassDefinition, other: &ClassDefinition) -> bool {
    other.id != candidate.id
        && other.branch_id == candidate.branch_id
        && (other.instructor_id == candidate.instructor_id || other.room_id == candidate.room_id)
}

/// Every class in `classes` that could collide with `candidate`.
pub fn conflict_candidates<'a>(
    candidate: &'a ClassDefinition,
    classes: &'a [ClassDefinition],
) -> impl Iterator<Item = &'a ClassDefinition> + 'a {
    classes
        .iter()
        .filter(|other| is_conflict_candidate(candidate, other))
}
