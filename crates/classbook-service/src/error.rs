use serde::Serialize;
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] classbook_core::error::CoreError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(ScheduleConflict),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Transport-agnostic classification of a `ServiceError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    Conflict,
    Validation,
}

impl ServiceError {
    #[must_use]
    pub const fn status(&self) -> ErrorStatus {
        match self {
            Self::Conflict(_) => ErrorStatus::Conflict,
            Self::CoreError(_) | Self::ValidationError(_) => ErrorStatus::Validation,
        }
    }
}

/// Field of the new class blamed for a booking conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictField {
    InstructorId,
    RoomId,
    TimeSlots,
}

impl ConflictField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InstructorId => "instructorId",
            Self::RoomId => "roomId",
            Self::TimeSlots => "timeSlots",
        }
    }
}

impl std::fmt::Display for ConflictField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collision between a new class and an existing booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleConflict {
    pub field: ConflictField,
    pub message: String,
}

impl std::fmt::Display for ScheduleConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
