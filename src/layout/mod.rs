//! Layout rendering
//!
//! Converts a validated Song into a RenderGrid. Each string block becomes
//! one row group: annotation rows above, the four lane rows, annotation
//! rows below. Within the lane rows every note column is rendered across
//! all four lanes at once, so the grid stays column-aligned; lanes with no
//! note at a column get a blank cell of the same width.

pub mod glyphs;
pub mod grid;

pub use grid::{RenderCell, RenderGrid, RenderRow, RowGroup, RowKind};

use crate::models::annotations::AnnotationAnchor;
use crate::models::config::Configuration;
use crate::models::song::{Lane, Song, StringBlock};
use glyphs::{AUGMENTATION_DOT, BARLINE, TIE_CONTINUATION};

/// Render the whole song into a grid
pub fn render(song: &Song, config: &Configuration) -> RenderGrid {
    let groups = song
        .blocks
        .iter()
        .map(|block| render_block(block, config))
        .collect();
    let grid = RenderGrid { groups };
    log::debug!(
        "rendered {} row groups, {} rows total",
        grid.groups.len(),
        grid.lines().len()
    );
    grid
}

fn render_block(block: &StringBlock, config: &Configuration) -> RowGroup {
    let mut rows = Vec::new();

    for _ in 0..block.blank_rows_before {
        rows.push(RenderRow::blank());
    }
    for annotation in block.annotations_at(AnnotationAnchor::BeforeGroup) {
        rows.push(RenderRow::annotation(annotation.text.clone()));
    }
    for annotation in block.annotations_at(AnnotationAnchor::AboveGroup) {
        rows.push(RenderRow::annotation(annotation.text.clone()));
    }

    rows.extend(render_lanes(block, config));

    for annotation in block.annotations_at(AnnotationAnchor::AfterGroup) {
        rows.push(RenderRow::annotation(annotation.text.clone()));
    }
    for _ in 0..block.blank_rows_after {
        rows.push(RenderRow::blank());
    }

    RowGroup { rows }
}

/// Render the four lane rows of one block, column group by column group
fn render_lanes(block: &StringBlock, config: &Configuration) -> Vec<RenderRow> {
    let gap = config.gap_size;
    let mut cells: [Vec<RenderCell>; 4] = std::array::from_fn(|_| Vec::new());

    // opening double bar
    for lane_cells in &mut cells {
        lane_cells.push(RenderCell::glyph(BARLINE));
        lane_cells.push(RenderCell::glyph(BARLINE));
    }

    for measure in &block.measures {
        let columns = measure.note_columns();
        // ties reaching the closing bar continue through it
        let mut tied_at_close = [false; 4];

        if columns.is_empty() && gap > 0 {
            let filler = "-".repeat(gap);
            for lane_cells in &mut cells {
                lane_cells.push(RenderCell::new(filler.clone(), gap));
            }
        }

        for (ci, &column) in columns.iter().enumerate() {
            let mut texts: [String; 4] = std::array::from_fn(|_| String::new());
            let mut ties = [false; 4];
            for note in measure.notes_at(column) {
                let li = note.lane.index();
                let mut text = String::new();
                text.push(note.duration.glyph());
                if note.dotted {
                    text.push(AUGMENTATION_DOT);
                }
                text.push_str(&note.trailing_legend);
                texts[li] = text;
                ties[li] = note.tie;
            }
            let width = texts
                .iter()
                .map(|t| t.chars().count())
                .max()
                .unwrap_or(1)
                .max(1);
            for (li, lane_cells) in cells.iter_mut().enumerate() {
                lane_cells.push(RenderCell::new(texts[li].clone(), width));
            }

            if ci + 1 < columns.len() {
                if gap > 0 {
                    for (li, lane_cells) in cells.iter_mut().enumerate() {
                        let filler = if ties[li] { TIE_CONTINUATION } else { '-' };
                        lane_cells
                            .push(RenderCell::new(filler.to_string().repeat(gap), gap));
                    }
                }
            } else {
                tied_at_close = ties;
            }
        }

        // closing bar, carried through by a tie on that lane
        for (li, lane_cells) in cells.iter_mut().enumerate() {
            let glyph = if tied_at_close[li] { TIE_CONTINUATION } else { BARLINE };
            lane_cells.push(RenderCell::glyph(glyph));
        }
    }

    // closing double bar
    for lane_cells in &mut cells {
        lane_cells.push(RenderCell::glyph(BARLINE));
    }

    cells
        .into_iter()
        .zip(Lane::ALL)
        .map(|(lane_cells, lane)| RenderRow {
            kind: RowKind::Lane(lane),
            cells: lane_cells,
        })
        .collect()
}
