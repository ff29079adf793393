//! Merged, paginated occurrence listings across many classes.

use classbook_core::config::ScheduleConfig;
use classbook_core::constants::{DEFAULT_PAGE_LIMIT, FIRST_PAGE};
use serde::Serialize;

use crate::expand::expand;
use crate::model::{ClassDefinition, Occurrence, QueryWindow};

/// One page of occurrences. `total` counts every occurrence before slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrencePage {
    pub occurrences: Vec<Occurrence>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Expands classes over a window and pages through the merged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceAggregator {
    empty_limit: usize,
}

impl Default for OccurrenceAggregator {
    fn default() -> Self {
        Self {
            empty_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl OccurrenceAggregator {
    #[must_use]
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            empty_limit: config.default_page_limit,
        }
    }

    /// ## Summary
    /// Expands every class over `window`, merges the results sorted by start
    /// time and returns the requested page.
    ///
    /// Without a `limit` the page holds everything, or the configured default
    /// when nothing matched. `page` defaults to 1; page 0 is treated as page 1.
    /// A page past the end is empty, not an error.
    #[must_use]
    pub fn aggregate<'a>(
        &self,
        classes: impl IntoIterator<Item = &'a ClassDefinition>,
        window: &QueryWindow,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> OccurrencePage {
        let mut occurrences: Vec<Occurrence> = classes
            .into_iter()
            .flat_map(|class| expand(class, window))
            .collect();
        occurrences.sort_by_key(|occurrence| occurrence.start_at);

        let total = occurrences.len();
        let limit = limit.unwrap_or(if total > 0 { total } else { self.empty_limit });
        let page = page.unwrap_or(FIRST_PAGE).max(FIRST_PAGE);
        let offset = (page - FIRST_PAGE).saturating_mul(limit);

        tracing::debug!(total, page, limit, "Aggregated occurrences");

        OccurrencePage {
            occurrences: occurrences.into_iter().skip(offset).take(limit).collect(),
            total,
            page,
            limit,
        }
    }
}

/// ## Summary
/// [`OccurrenceAggregator::aggregate`] with the default settings.
#[must_use]
pub fn aggregate<'a>(
    classes: impl IntoIterator<Item = &'a ClassDefinition>,
    window: &QueryWindow,
    page: Option<usize>,
    limit: Option<usize>,
) -> OccurrencePage {
    OccurrenceAggregator::default().aggregate(classes, window, page, limit)
}
