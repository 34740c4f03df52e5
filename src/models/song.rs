//! Music model built by the parser
//!
//! Ownership runs Song → StringBlock → Measure → Note/Chord. The model is
//! built once per run and is read-only afterwards, except for the extra-text
//! placement pass that promotes buffered text into annotations before
//! rendering begins.

use crate::models::annotations::{Annotation, AnnotationAnchor};
use crate::models::duration::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the four fixed string tracks, in top-to-bottom input order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    G,
    D,
    A,
    E,
}

impl Lane {
    /// Lanes in the fixed input order
    pub const ALL: [Lane; 4] = [Lane::G, Lane::D, Lane::A, Lane::E];

    /// Uppercase identifier character
    pub fn id(self) -> char {
        match self {
            Lane::G => 'G',
            Lane::D => 'D',
            Lane::A => 'A',
            Lane::E => 'E',
        }
    }

    /// Row index within a block, 0 = G
    pub fn index(self) -> usize {
        match self {
            Lane::G => 0,
            Lane::D => 1,
            Lane::A => 2,
            Lane::E => 3,
        }
    }

    /// Lane for an identifier character, case-insensitive
    pub fn from_id(c: char) -> Option<Lane> {
        match c.to_ascii_uppercase() {
            'G' => Some(Lane::G),
            'D' => Some(Lane::D),
            'A' => Some(Lane::A),
            'E' => Some(Lane::E),
            _ => None,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A single fretted note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Note {
    pub lane: Lane,
    /// Fret digits as written, one or more characters
    pub fret: String,
    /// Column of the first fret digit within the block
    pub start_column: usize,
    pub duration: Duration,
    /// Tied into the next note
    pub tie: bool,
    pub dotted: bool,
    /// Playing legend characters written directly after the fret digits,
    /// carried through as opaque glyphs
    pub trailing_legend: String,
}

impl Note {
    /// Half-open column range occupied by the fret digits
    pub fn span(&self) -> (usize, usize) {
        let len = self.fret.chars().count();
        (self.start_column, self.start_column + len)
    }
}

/// Two or more notes struck together: identical start column and duration.
/// The member notes stay in the measure; the chord references them by lane.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chord {
    pub start_column: usize,
    pub duration: Duration,
    pub lanes: Vec<Lane>,
}

/// A bar-delimited segment of a string block, spanning all four lanes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Measure {
    /// 0-based position within the block
    pub index: usize,
    /// First content column, just past the opening bar
    pub start_column: usize,
    /// Closing bar column (exclusive)
    pub end_column: usize,
    pub notes: Vec<Note>,
    pub chords: Vec<Chord>,
}

impl Measure {
    pub fn new(index: usize, start_column: usize, end_column: usize) -> Self {
        Measure {
            index,
            start_column,
            end_column,
            notes: Vec::new(),
            chords: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Distinct note start columns in ascending order
    pub fn note_columns(&self) -> Vec<usize> {
        let columns: BTreeSet<usize> = self.notes.iter().map(|n| n.start_column).collect();
        columns.into_iter().collect()
    }

    /// Notes starting at a given column, in lane order
    pub fn notes_at(&self, column: usize) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.start_column == column)
            .collect()
    }
}

/// A line of extra or blank text buffered around a block, kept until the
/// placement pass promotes or discards it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BufferedLine {
    /// 1-based input line number
    pub line: usize,
    pub text: String,
}

impl BufferedLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One timing-line-plus-four-lane unit of tab content
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StringBlock {
    /// 0-based position within the song
    pub index: usize,
    /// Input line number of the first musical line of the block
    pub first_line: usize,
    /// Input line number of the last string line of the block
    pub last_line: usize,
    /// Input line number of each lane, G first
    pub lane_lines: [usize; 4],
    /// Aligned lane contents, G first
    pub lanes: [String; 4],
    /// Timing row re-aligned to the G lane, when one was supplied
    pub timing_row: Option<String>,
    /// Per-lane text found before the string data on the same line
    pub leading_extra: [String; 4],
    /// Per-lane text found after the string data on the same line
    pub trailing_extra: [String; 4],
    /// Whole lines buffered before this block (first block only)
    pub before_lines: Vec<BufferedLine>,
    /// Whole lines buffered between the block's own musical lines
    pub above_lines: Vec<BufferedLine>,
    /// Whole lines buffered after this block, up to the next block
    pub after_lines: Vec<BufferedLine>,
    pub measures: Vec<Measure>,
    /// Annotations attached by the placement pass
    pub annotations: Vec<Annotation>,
    /// Literal blank rows carried into the output when extra text is dropped
    pub blank_rows_before: usize,
    pub blank_rows_after: usize,
}

impl StringBlock {
    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    /// Annotations with a given anchor, in attachment order
    pub fn annotations_at(&self, anchor: AnnotationAnchor) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.anchor == anchor)
            .collect()
    }
}

/// Root aggregate: the ordered sequence of string blocks parsed from one input
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Song {
    pub blocks: Vec<StringBlock>,
}

impl Song {
    pub fn measure_count(&self) -> usize {
        self.blocks.iter().map(StringBlock::measure_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
