//! Measure segmentation
//!
//! Walks a block's four lanes in lock-step and splits them at bar delimiter
//! columns. A bar delimiter is a column where every lane holds `|`; a `|` in
//! some lanes but not all is a misalignment and aborts the run.

use crate::error::TabError;
use crate::models::song::{Lane, Measure, StringBlock};

/// Split a block's lanes into measures. Fills `block.measures`.
pub fn segment_block(block: &mut StringBlock) -> Result<(), TabError> {
    let lanes: Vec<Vec<char>> = block.lanes.iter().map(|l| l.chars().collect()).collect();
    let width = lanes.iter().map(Vec::len).max().unwrap_or(0);

    let mut bar_columns = Vec::new();
    for column in 0..width {
        let marks: Vec<bool> = lanes
            .iter()
            .map(|lane| lane.get(column) == Some(&'|'))
            .collect();
        if marks.iter().any(|&m| m) {
            if let Some(missing) = marks.iter().position(|&m| !m) {
                return Err(TabError::MisalignedBarLines {
                    first_line: block.first_line,
                    last_line: block.last_line,
                    column,
                    lane: Lane::ALL[missing],
                });
            }
            bar_columns.push(column);
        }
    }

    let mut measures = Vec::new();
    for pair in bar_columns.windows(2) {
        let (open, close) = (pair[0], pair[1]);
        if close > open + 1 {
            measures.push(Measure::new(measures.len(), open + 1, close));
        }
        // adjacent bars ("||") delimit nothing
    }
    log::debug!(
        "block {}: {} bar columns, {} measures",
        block.index,
        bar_columns.len(),
        measures.len()
    );
    block.measures = measures;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with_lanes(lanes: [&str; 4]) -> StringBlock {
        StringBlock {
            index: 0,
            first_line: 1,
            last_line: 4,
            lane_lines: [1, 2, 3, 4],
            lanes: lanes.map(str::to_string),
            timing_row: None,
            leading_extra: Default::default(),
            trailing_extra: Default::default(),
            before_lines: Vec::new(),
            above_lines: Vec::new(),
            after_lines: Vec::new(),
            measures: Vec::new(),
            annotations: Vec::new(),
            blank_rows_before: 0,
            blank_rows_after: 0,
        }
    }

    #[test]
    fn test_two_measures() {
        let mut block = block_with_lanes(["|1--|--2|", "|---|---|", "|---|---|", "|---|---|"]);
        segment_block(&mut block).unwrap();
        assert_eq!(block.measures.len(), 2);
        assert_eq!(block.measures[0].start_column, 1);
        assert_eq!(block.measures[0].end_column, 4);
        assert_eq!(block.measures[1].start_column, 5);
        assert_eq!(block.measures[1].end_column, 8);
    }

    #[test]
    fn test_lane_id_prefix_is_outside_measures() {
        let mut block = block_with_lanes(["G|1--|", "D|---|", "A|---|", "E|---|"]);
        segment_block(&mut block).unwrap();
        assert_eq!(block.measures.len(), 1);
        assert_eq!(block.measures[0].start_column, 2);
    }

    #[test]
    fn test_adjacent_bars_make_no_measure() {
        let mut block = block_with_lanes(["|1--||", "|---||", "|---||", "|---||"]);
        segment_block(&mut block).unwrap();
        assert_eq!(block.measures.len(), 1);
    }

    #[test]
    fn test_misaligned_bar_is_an_error() {
        let mut block = block_with_lanes(["|1---|", "|--|-|", "|----|", "|----|"]);
        let err = segment_block(&mut block).unwrap_err();
        match err {
            TabError::MisalignedBarLines { column, lane, .. } => {
                assert_eq!(column, 3);
                assert_eq!(lane, Lane::G, "the G lane has no bar at column 3");
            }
            other => panic!("expected MisalignedBarLines, got {:?}", other),
        }
    }

    #[test]
    fn test_short_lane_misaligns_at_final_bar() {
        let mut block = block_with_lanes(["|1---|", "|---|", "|----|", "|----|"]);
        assert!(matches!(
            segment_block(&mut block),
            Err(TabError::MisalignedBarLines { .. })
        ));
    }
}
