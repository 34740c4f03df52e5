//! Extra text placement
//!
//! Promotes the text buffered during assembly into annotations anchored at
//! block boundaries. When extra text is kept, per-lane leading and trailing
//! text joins into one line per side with `"; "`, whole buffered lines keep
//! their own rows, and in-block text merges into a single row directly above
//! the lanes. When extra text is dropped, only the blank-line runs between
//! blocks survive, as literal blank output rows.

use crate::models::annotations::{Annotation, AnnotationAnchor};
use crate::models::config::Configuration;
use crate::models::song::{BufferedLine, Song, StringBlock};

/// Delimiter between per-lane text fragments joined onto one row
pub const EXTRA_TEXT_DELIMITER: &str = "; ";

/// Attach annotations (or blank rows) to every block of the song. This is
/// the only mutation of the model after parsing.
pub fn place_extra_text(song: &mut Song, config: &Configuration) {
    for block in &mut song.blocks {
        let before = std::mem::take(&mut block.before_lines);
        let above = std::mem::take(&mut block.above_lines);
        let after = std::mem::take(&mut block.after_lines);

        if config.has_extra && config.keep_extra {
            place_kept(block, before, above, after);
        } else {
            // extra text is dropped; blank runs between blocks carry
            // forward as literal empty rows
            block.blank_rows_before = before.iter().filter(|l| l.is_blank()).count();
            block.blank_rows_after = after.iter().filter(|l| l.is_blank()).count();
        }
    }
}

fn place_kept(
    block: &mut StringBlock,
    before: Vec<BufferedLine>,
    above: Vec<BufferedLine>,
    after: Vec<BufferedLine>,
) {
    for line in before.iter().filter(|l| !l.is_blank()) {
        block
            .annotations
            .push(Annotation::new(AnnotationAnchor::BeforeGroup, line.text.clone()));
    }
    if let Some(joined) = join_lane_text(&block.leading_extra) {
        block
            .annotations
            .push(Annotation::new(AnnotationAnchor::BeforeGroup, joined));
    }

    if let Some(merged) = merge_above(&above) {
        block
            .annotations
            .push(Annotation::new(AnnotationAnchor::AboveGroup, merged));
    }

    if let Some(joined) = join_lane_text(&block.trailing_extra) {
        block
            .annotations
            .push(Annotation::new(AnnotationAnchor::AfterGroup, joined));
    }
    for line in after.iter().filter(|l| !l.is_blank()) {
        block
            .annotations
            .push(Annotation::new(AnnotationAnchor::AfterGroup, line.text.clone()));
    }

    if !block.annotations.is_empty() {
        log::debug!(
            "block {}: attached {} annotations",
            block.index,
            block.annotations.len()
        );
    }
}

/// Join the four lanes' side text top-to-bottom into one row, skipping
/// lanes that had none
fn join_lane_text(per_lane: &[String; 4]) -> Option<String> {
    let parts: Vec<&str> = per_lane
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(EXTRA_TEXT_DELIMITER))
    }
}

/// Lay in-block occurrences end to end: each keeps its interior spacing
/// relative to its own start, occurrences are separated by one space
fn merge_above(above: &[BufferedLine]) -> Option<String> {
    let parts: Vec<&str> = above
        .iter()
        .map(|l| l.text.trim_start())
        .filter(|t| !t.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
