/// Horizon used to bound open-ended recurring classes when checking conflicts.
pub const DEFAULT_CONFLICT_HORIZON_WEEKS: u32 = 8;

/// Page size used by listings when nothing was expanded and no limit was given.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// First page number; pages are 1-based.
pub const FIRST_PAGE: usize = 1;

/// Local time-of-day wire format (`HH:mm`, 24-hour, zero-padded).
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";
