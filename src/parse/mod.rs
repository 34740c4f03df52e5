//! Parsing pipeline
//!
//! Turns raw input lines into a Song: classification, block assembly,
//! measure segmentation, note resolution, overlap validation, and extra
//! text placement, in that order. Every stage fails fast; no partial Song
//! is ever returned.

pub mod blocks;
pub mod classify;
pub mod extra_text;
pub mod measures;
pub mod notes;
pub mod overlap;

pub use classify::{LineClassifier, LineKind};

use crate::error::TabError;
use crate::models::config::Configuration;
use crate::models::song::Song;
use blocks::BlockAssembler;
use serde::{Deserialize, Serialize};

/// One raw input line with its 1-based position in the loaded file
#[derive(Clone, Debug, PartialEq)]
pub struct RawLine {
    pub index: usize,
    pub text: String,
}

/// Split loaded text into numbered raw lines
pub fn raw_lines(text: &str) -> Vec<RawLine> {
    text.lines()
        .enumerate()
        .map(|(i, line)| RawLine {
            index: i + 1,
            text: line.to_string(),
        })
        .collect()
}

/// Counters reported alongside the parsed song for diagnostics
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ParseSummary {
    /// Raw lines received
    pub lines_loaded: usize,
    /// Lines consumed by the classifier
    pub lines_parsed: usize,
    /// Lines classified as string or timing lines
    pub string_timing_lines: usize,
    /// Measures created across all blocks
    pub measures: usize,
}

/// Run the whole parsing pipeline over the input lines.
///
/// An input in which nothing classifies as musical content is not an error:
/// it yields an empty song and zero counters.
pub fn parse_song(
    lines: &[RawLine],
    config: &Configuration,
) -> Result<(Song, ParseSummary), TabError> {
    config.validate()?;
    let classifier = LineClassifier::new(config)?;
    let mut assembler = BlockAssembler::new(config);
    let mut summary = ParseSummary {
        lines_loaded: lines.len(),
        ..ParseSummary::default()
    };

    for line in lines {
        let kind = classifier.classify(line, assembler.timing_expected())?;
        if matches!(kind, LineKind::Timing(_) | LineKind::StringLine(_)) {
            summary.string_timing_lines += 1;
        }
        assembler.push(line.index, kind)?;
        summary.lines_parsed += 1;
    }

    let mut song = assembler.finish()?;
    for block in &mut song.blocks {
        measures::segment_block(block)?;
        notes::resolve_notes(block, config)?;
        overlap::validate_overlaps(block)?;
    }
    extra_text::place_extra_text(&mut song, config);

    summary.measures = song.measure_count();
    log::info!(
        "parsed {} lines into {} blocks, {} measures",
        summary.lines_loaded,
        song.blocks.len(),
        summary.measures
    );
    Ok((song, summary))
}
