//! Booking-conflict detection for new classes.
//!
//! A check only reads: it expands the candidate and every class that shares its
//! branch and its instructor or room, then looks for an overlapping pair. It
//! does not reserve anything, so two concurrent creations can both pass. The
//! store that persists classes has to enforce exclusivity on its own.

use chrono::TimeDelta;
use classbook_core::config::ScheduleConfig;
use classbook_core::constants::DEFAULT_CONFLICT_HORIZON_WEEKS;

use crate::catalog::is_conflict_candidate;
use crate::error::{ConflictField, ScheduleConflict, ServiceError, ServiceResult};
use crate::expand::expand;
use crate::model::{ClassDefinition, ClassSchedule, Occurrence, QueryWindow};

/// Checks new classes against existing bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictChecker {
    horizon: TimeDelta,
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::new(DEFAULT_CONFLICT_HORIZON_WEEKS)
    }
}

impl ConflictChecker {
    /// A checker that looks `horizon_weeks` past `dtstart` for recurring classes
    /// without an `until`.
    #[must_use]
    pub fn new(horizon_weeks: u32) -> Self {
        Self {
            horizon: TimeDelta::weeks(i64::from(horizon_weeks)),
        }
    }

    #[must_use]
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.conflict_horizon_weeks)
    }

    /// ## Summary
    /// The window over which `candidate` is checked.
    ///
    /// Single classes use their own span. Recurring classes run from `dtstart`
    /// to `until`, or to `dtstart` plus the configured horizon when open-ended.
    /// The horizon only bounds the check; it does not end the class.
    ///
    /// ## Errors
    /// Returns a validation error if the resulting window is empty.
    pub fn conflict_window(&self, candidate: &ClassDefinition) -> ServiceResult<QueryWindow> {
        let (from, to) = match &candidate.schedule {
            ClassSchedule::Single { start_at, end_at } => (*start_at, *end_at),
            ClassSchedule::Recurring { dtstart, until, .. } => {
                let to = match until {
                    Some(until) => *until,
                    None => dtstart.checked_add_signed(self.horizon).ok_or_else(|| {
                        ServiceError::ValidationError(format!(
                            "conflict horizon overflows from {}",
                            dtstart.to_rfc3339()
                        ))
                    })?,
                };
                (*dtstart, to)
            }
        };
        Ok(QueryWindow::new(from, to)?)
    }

    /// ## Summary
    /// Expands `candidate` over its conflict window and checks it against
    /// `existing`.
    ///
    /// ## Errors
    /// Returns `ServiceError::Conflict` on the first overlap found, or a
    /// validation error if the candidate's window is empty.
    pub fn check<'a>(
        &self,
        candidate: &ClassDefinition,
        existing: impl IntoIterator<Item = &'a ClassDefinition>,
    ) -> ServiceResult<()> {
        let window = self.conflict_window(candidate)?;
        let occurrences = expand(candidate, &window);
        tracing::debug!(
            class_id = %candidate.id,
            occurrences = occurrences.len(),
            from = %window.start(),
            to = %window.end(),
            "Checking class for conflicts"
        );
        check_conflicts(candidate, &occurrences, existing, &window)
    }
}

/// ## Summary
/// Looks for the first overlap between `candidate_occurrences` and the
/// occurrences of any class in `existing` that shares `candidate`'s branch and
/// its instructor or room, both expanded over `window`.
///
/// Classes with the candidate's own id are skipped. Occurrences that only touch
/// (one ends exactly when the other starts) do not conflict.
///
/// ## Errors
/// Returns `ServiceError::Conflict` naming the colliding class and occurrence.
pub fn check_conflicts<'a>(
    candidate: &ClassDefinition,
    candidate_occurrences: &[Occurrence],
    existing: impl IntoIterator<Item = &'a ClassDefinition>,
    window: &QueryWindow,
) -> ServiceResult<()> {
    for other in existing
        .into_iter()
        .filter(|other| is_conflict_candidate(candidate, other))
    {
        let other_occurrences = expand(other, window);
        let collision = candidate_occurrences.iter().find_map(|new| {
            other_occurrences
                .iter()
                .find(|booked| new.overlaps(booked))
        });

        if let Some(booked) = collision {
            let conflict = describe(candidate, other, booked);
            tracing::debug!(
                class_id = %candidate.id,
                conflicting_class_id = %other.id,
                field = %conflict.field,
                "Schedule conflict found"
            );
            return Err(ServiceError::Conflict(conflict));
        }
    }

    Ok(())
}

/// ## Summary
/// Which field of `candidate` to blame for colliding with `other`: the
/// instructor if shared, else the room, else the time slots themselves.
#[must_use]
pub fn attribute(candidate: &ClassDefinition, other: &ClassDefinition) -> ConflictField {
    if other.instructor_id == candidate.instructor_id {
        ConflictField::InstructorId
    } else if other.room_id == candidate.room_id {
        ConflictField::RoomId
    } else {
        ConflictField::TimeSlots
    }
}

fn describe(
    candidate: &ClassDefinition,
    other: &ClassDefinition,
    booked: &Occurrence,
) -> ScheduleConflict {
    let field = attribute(candidate, other);
    let subject = match field {
        ConflictField::InstructorId => "Instructor is already teaching",
        ConflictField::RoomId => "Room is already booked for",
        ConflictField::TimeSlots => "Time slot overlaps",
    };
    ScheduleConflict {
        field,
        message: format!(
            "{subject} class \"{}\" ({}) from {} to {}",
            other.name,
            other.id,
            booked.start_at.to_rfc3339(),
            booked.end_at.to_rfc3339()
        ),
    }
}
