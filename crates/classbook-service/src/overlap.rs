//! Half-open interval overlap.

/// ## Summary
/// Whether `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// An interval that ends exactly where the other begins does not overlap it.
#[must_use]
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}
