//! Error types for the tab parsing and layout pipeline
//!
//! Every error is terminal for the current run: the pipeline aborts on the
//! first failure and reports it with full line/lane/column context. There is
//! no auto-repair of malformed input.

use crate::models::duration::Duration;
use crate::models::song::Lane;
use thiserror::Error;

/// Top-level pipeline error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TabError {
    /// The resolved configuration is internally inconsistent
    #[error("configuration invalid: {reason}")]
    ConfigValidation { reason: String },

    /// A configuration file line could not be read as its expected option
    #[error("config file error on option line {line}: {reason}")]
    ConfigFile { line: usize, reason: String },

    /// A non-musical line was found while extra text is disabled
    #[error("line {line}: unexpected extra text: {text:?}")]
    UnexpectedExtraText { line: usize, text: String },

    /// A string line carried a lane identifier out of the fixed G,D,A,E order
    #[error("line {line}: string {found:?} is out of order, expected string {expected:?}")]
    StringOrder {
        line: usize,
        found: char,
        expected: char,
    },

    /// Input ended before a string block collected its four string lines
    #[error("line {line}: incomplete string block, got {got} of 4 string lines")]
    IncompleteStringBlock { line: usize, got: usize },

    /// A bar delimiter is present in one lane but missing in another
    #[error(
        "lines {first_line}-{last_line}: misaligned bar lines at column {column}, \
         lane {lane} has no \"|\" there"
    )]
    MisalignedBarLines {
        first_line: usize,
        last_line: usize,
        column: usize,
        lane: Lane,
    },

    /// Timing was supplied but the column above a fret's first digit holds no
    /// duration symbol
    #[error(
        "line {line}: no timing symbol above column {column} (lane {lane}, fret {fret:?})"
    )]
    MissingTimingSymbol {
        line: usize,
        column: usize,
        lane: Lane,
        fret: String,
    },

    /// Notes at the same start column resolved to different durations
    #[error(
        "line {line}: notes at column {column} mix durations {first} and {second} \
         and cannot form a chord"
    )]
    ChordDurationMismatch {
        line: usize,
        column: usize,
        first: Duration,
        second: Duration,
    },

    /// Two notes in one measure occupy partially overlapping column ranges
    #[error(
        "measure {measure}: notes overlap, lane {first_lane} columns \
         {first_start}..{first_end} vs lane {second_lane} columns {second_start}..{second_end}"
    )]
    NoteOverlap {
        measure: usize,
        first_lane: Lane,
        first_start: usize,
        first_end: usize,
        second_lane: Lane,
        second_start: usize,
        second_end: usize,
    },

    /// Template rendering failed while producing output markup
    #[error("template rendering failed: {reason}")]
    Template { reason: String },

    /// An I/O operation failed; wraps the underlying message with the action
    /// that was attempted
    #[error("I/O error while {action}: {message}")]
    Io { action: String, message: String },
}

impl TabError {
    /// Wrap an I/O error with a short description of the attempted action
    pub fn io(action: &str, err: std::io::Error) -> Self {
        TabError::Io {
            action: action.to_string(),
            message: err.to_string(),
        }
    }
}
