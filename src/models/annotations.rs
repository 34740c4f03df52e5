//! Annotations: extra text repositioned around rendered blocks
//!
//! Extra text carries no musical meaning. The placement pass turns the text
//! buffered during assembly into annotations anchored at a block boundary;
//! the renderer emits them as plain text rows, never inside note columns.

use serde::{Deserialize, Serialize};

/// Where an annotation row sits relative to its block's rendered rows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationAnchor {
    /// Above everything else in the block's row group
    BeforeGroup,
    /// Directly above the four lane rows
    AboveGroup,
    /// Below the four lane rows
    AfterGroup,
}

/// One row of repositioned extra text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Annotation {
    pub anchor: AnnotationAnchor,
    pub text: String,
}

impl Annotation {
    pub fn new(anchor: AnnotationAnchor, text: impl Into<String>) -> Self {
        Annotation {
            anchor,
            text: text.into(),
        }
    }
}
