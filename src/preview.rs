//! Bounded, order-preserving preview of parsed records.

use crate::record::Record;

/// Upper bound on preview length.
pub const PREVIEW_ROWS: usize = 50;

/// Returns the first `min(50, len)` records, unmodified and in original
/// order. Blank-cell rendering is a presentation concern, not handled here.
pub fn sample(records: &[Record]) -> &[Record] {
    &records[..records.len().min(PREVIEW_ROWS)]
}
