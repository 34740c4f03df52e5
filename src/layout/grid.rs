//! Render grid display list
//!
//! The output structure the core hands to the serializer: one row group per
//! string block, each group an ordered list of display rows, each row an
//! ordered list of cells. All positions are pre-computed; a serializer only
//! has to emit cells in order, padding each to its column width.

use crate::models::song::Lane;
use serde::{Deserialize, Serialize};

/// What a display row holds, so serializers can style rows differently
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Repositioned extra text
    Annotation,
    /// One of the four lanes
    Lane(Lane),
    /// A preserved empty input row
    Blank,
}

/// One display cell: text plus the column width it must be padded to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderCell {
    pub text: String,
    pub width: usize,
}

impl RenderCell {
    pub fn new(text: impl Into<String>, width: usize) -> Self {
        RenderCell {
            text: text.into(),
            width,
        }
    }

    /// A one-column cell holding a single glyph
    pub fn glyph(c: char) -> Self {
        RenderCell {
            text: c.to_string(),
            width: 1,
        }
    }

    /// Cell text padded with trailing spaces to the cell width
    pub fn padded(&self) -> String {
        let mut out = self.text.clone();
        let mut len = out.chars().count();
        while len < self.width {
            out.push(' ');
            len += 1;
        }
        out
    }
}

/// An ordered row of cells
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderRow {
    pub kind: RowKind,
    pub cells: Vec<RenderCell>,
}

impl RenderRow {
    pub fn new(kind: RowKind) -> Self {
        RenderRow {
            kind,
            cells: Vec::new(),
        }
    }

    pub fn annotation(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = text.chars().count();
        RenderRow {
            kind: RowKind::Annotation,
            cells: vec![RenderCell::new(text, width)],
        }
    }

    pub fn blank() -> Self {
        RenderRow {
            kind: RowKind::Blank,
            cells: Vec::new(),
        }
    }

    /// Flatten the row into display text
    pub fn to_text(&self) -> String {
        self.cells.iter().map(RenderCell::padded).collect()
    }
}

/// All rows belonging to one string block
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RowGroup {
    pub rows: Vec<RenderRow>,
}

/// The full column-aligned output table
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RenderGrid {
    pub groups: Vec<RowGroup>,
}

impl RenderGrid {
    /// Flatten every group into display lines, in order
    pub fn lines(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| g.rows.iter().map(RenderRow::to_text))
            .collect()
    }
}
