//! Plain value records consumed and produced by the scheduling core.

mod class;
mod occurrence;
mod pattern;
mod time_slot;
mod window;

pub use class::{ClassDefinition, ClassSchedule};
pub use occurrence::Occurrence;
pub use pattern::{MonthDay, RecurrencePattern, Weekday, WeekdaySlots};
pub use time_slot::TimeSlot;
pub use window::QueryWindow;
