//! Combining records from several sources into one list without duplicates.
//!
//! Scans yield tens of cells at most, so a linear search per candidate is fine.

use tracing::debug;

use crate::model::RadioRecord;

/// Appends every candidate that is usable and not already in `target`.
/// The first copy of a cell wins. Returns the number of records added.
pub fn merge_into(
    target: &mut Vec<RadioRecord>,
    candidates: impl IntoIterator<Item = RadioRecord>,
) -> usize {
    let mut added = 0;
    for candidate in candidates {
        if !candidate.has_identity() {
            debug!(cell = %candidate.cell_identity(), "dropping cell without identity");
            continue;
        }
        if target.contains(&candidate) {
            debug!(cell = %candidate.cell_identity(), "dropping duplicate cell");
            continue;
        }
        target.push(candidate);
        added += 1;
    }
    added
}

pub fn dedup(candidates: impl IntoIterator<Item = RadioRecord>) -> Vec<RadioRecord> {
    let mut cells = Vec::new();
    merge_into(&mut cells, candidates);
    cells
}
