use chrono::{DateTime, FixedOffset};
use classbook_core::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

use crate::overlap::overlaps;

/// A half-open `[from, to)` range of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRepr", into = "WindowRepr")]
pub struct QueryWindow {
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
}

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
}

impl QueryWindow {
    /// ## Errors
    /// Returns `CoreError::ValidationError` unless `from < to`.
    pub fn new(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> CoreResult<Self> {
        if from >= to {
            return Err(CoreError::ValidationError(format!(
                "window start {} must be before end {}",
                from.to_rfc3339(),
                to.to_rfc3339()
            )));
        }
        Ok(Self { from, to })
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.from
    }

    /// Exclusive end.
    #[must_use]
    pub const fn end(&self) -> DateTime<FixedOffset> {
        self.to
    }

    /// Whether `[start, end)` overlaps this window.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> bool {
        overlaps(start, end, self.from, self.to)
    }
}

impl TryFrom<WindowRepr> for QueryWindow {
    type Error = CoreError;

    fn try_from(repr: WindowRepr) -> CoreResult<Self> {
        Self::new(repr.from, repr.to)
    }
}

impl From<QueryWindow> for WindowRepr {
    fn from(window: QueryWindow) -> Self {
        Self {
            from: window.from,
            to: window.to,
        }
    }
}
