//! Overlap validation
//!
//! Within one measure, the column ranges of any two notes must be either
//! disjoint or exactly equal. Equal ranges are the chord case already
//! grouped during resolution; anything in between means the tab's columns
//! cannot be read as a unique sequence of strikes.

use crate::error::TabError;
use crate::models::song::StringBlock;

/// Check every note pair in every measure of a block
pub fn validate_overlaps(block: &StringBlock) -> Result<(), TabError> {
    for measure in &block.measures {
        for (i, first) in measure.notes.iter().enumerate() {
            for second in &measure.notes[i + 1..] {
                let (a_start, a_end) = first.span();
                let (b_start, b_end) = second.span();
                let disjoint = a_end <= b_start || b_end <= a_start;
                let identical = a_start == b_start && a_end == b_end;
                if !disjoint && !identical {
                    return Err(TabError::NoteOverlap {
                        measure: measure.index,
                        first_lane: first.lane,
                        first_start: a_start,
                        first_end: a_end,
                        second_lane: second.lane,
                        second_start: b_start,
                        second_end: b_end,
                    });
                }
            }
        }
    }
    Ok(())
}
