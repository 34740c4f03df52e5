//! Note resolution
//!
//! Walks each measure lane by lane. Every maximal run of digits is a note;
//! the fret is the whole run and the start column is its first digit. The
//! duration comes from the timing row character directly above that first
//! digit (a symbol one column off is an error, not a near match), or is a
//! uniform quarter note when no timing was supplied. Notes that share a
//! start column form a chord, which requires their durations to agree.

use crate::error::TabError;
use crate::models::config::Configuration;
use crate::models::duration::Duration;
use crate::models::song::{Chord, Lane, Note, StringBlock};
use std::collections::BTreeMap;

/// Resolve all notes and chords in a block's measures. Fills
/// `measure.notes` and `measure.chords`.
pub fn resolve_notes(block: &mut StringBlock, config: &Configuration) -> Result<(), TabError> {
    let lanes: Vec<Vec<char>> = block.lanes.iter().map(|l| l.chars().collect()).collect();
    let timing: Option<Vec<char>> = block.timing_row.as_ref().map(|t| t.chars().collect());

    for measure in &mut block.measures {
        let mut notes = Vec::new();
        for lane in Lane::ALL {
            let chars = &lanes[lane.index()];
            let mut column = measure.start_column;
            while column < measure.end_column && column < chars.len() {
                if !chars[column].is_ascii_digit() {
                    column += 1;
                    continue;
                }
                let start = column;
                let mut fret = String::new();
                while column < measure.end_column && chars[column].is_ascii_digit() {
                    fret.push(chars[column]);
                    column += 1;
                }
                let mut trailing_legend = String::new();
                while column < measure.end_column
                    && config.playing_legend.contains(&chars[column])
                {
                    trailing_legend.push(chars[column]);
                    column += 1;
                }
                let (duration, tie, dotted) = resolve_duration(
                    timing.as_deref(),
                    start,
                    config,
                    block.lane_lines[lane.index()],
                    lane,
                    &fret,
                )?;
                notes.push(Note {
                    lane,
                    fret,
                    start_column: start,
                    duration,
                    tie,
                    dotted,
                    trailing_legend,
                });
            }
        }

        measure.chords = group_chords(&notes, block.first_line)?;
        measure.notes = notes;
    }
    Ok(())
}

/// Look up the duration for a note starting at `column`, plus tie and dot
/// flags from the symbols immediately following it on the timing row
fn resolve_duration(
    timing: Option<&[char]>,
    column: usize,
    config: &Configuration,
    lane_line: usize,
    lane: Lane,
    fret: &str,
) -> Result<(Duration, bool, bool), TabError> {
    if !config.timing_supplied {
        return Ok((Duration::Quarter, false, false));
    }
    let missing = || TabError::MissingTimingSymbol {
        line: lane_line,
        column,
        lane,
        fret: fret.to_string(),
    };
    let row = timing.ok_or_else(&missing)?;
    let symbol = row.get(column).copied().ok_or_else(&missing)?;
    let duration = config
        .timing_symbols
        .duration_for(symbol)
        .ok_or_else(&missing)?;

    let symbols = &config.timing_symbols;
    let mut next = column + 1;
    let mut tie = false;
    if row.get(next) == Some(&symbols.tie()) {
        tie = true;
        next += 1;
    }
    let dotted = row.get(next) == Some(&symbols.dot());
    Ok((duration, tie, dotted))
}

/// Group same-column notes into chords, enforcing that simultaneous notes
/// share one duration
fn group_chords(notes: &[Note], block_line: usize) -> Result<Vec<Chord>, TabError> {
    let mut by_column: BTreeMap<usize, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        by_column.entry(note.start_column).or_default().push(note);
    }

    let mut chords = Vec::new();
    for (column, members) in by_column {
        if members.len() < 2 {
            continue;
        }
        let duration = members[0].duration;
        for other in &members[1..] {
            if other.duration != duration {
                return Err(TabError::ChordDurationMismatch {
                    line: block_line,
                    column,
                    first: duration,
                    second: other.duration,
                });
            }
        }
        chords.push(Chord {
            start_column: column,
            duration,
            lanes: members.iter().map(|n| n.lane).collect(),
        });
    }
    Ok(chords)
}
