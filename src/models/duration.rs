//! Note duration ranks
//!
//! A duration is one of the eight symbol classes a timing line can assign,
//! from whole note down to hundred-twenty-eighth note. Only the rank is
//! stored; tie and dot markings live on the note itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration classes in decreasing time-length order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Duration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
    HundredTwentyEighth,
}

impl Duration {
    /// All durations, longest first (the order timing symbols are configured in)
    pub const ALL: [Duration; 8] = [
        Duration::Whole,
        Duration::Half,
        Duration::Quarter,
        Duration::Eighth,
        Duration::Sixteenth,
        Duration::ThirtySecond,
        Duration::SixtyFourth,
        Duration::HundredTwentyEighth,
    ];

    /// Rank within [`Duration::ALL`], 0 = whole note
    pub fn rank(self) -> usize {
        match self {
            Duration::Whole => 0,
            Duration::Half => 1,
            Duration::Quarter => 2,
            Duration::Eighth => 3,
            Duration::Sixteenth => 4,
            Duration::ThirtySecond => 5,
            Duration::SixtyFourth => 6,
            Duration::HundredTwentyEighth => 7,
        }
    }

    /// Inverse of [`Duration::rank`]
    pub fn from_rank(rank: usize) -> Option<Duration> {
        Duration::ALL.get(rank).copied()
    }

    /// Notation glyph for this duration
    pub fn glyph(self) -> char {
        crate::layout::glyphs::note_glyph(self)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Duration::Whole => "whole",
            Duration::Half => "half",
            Duration::Quarter => "quarter",
            Duration::Eighth => "eighth",
            Duration::Sixteenth => "sixteenth",
            Duration::ThirtySecond => "thirty-second",
            Duration::SixtyFourth => "sixty-fourth",
            Duration::HundredTwentyEighth => "hundred-twenty-eighth",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_round_trip() {
        for (i, d) in Duration::ALL.iter().enumerate() {
            assert_eq!(d.rank(), i);
            assert_eq!(Duration::from_rank(i), Some(*d));
        }
        assert_eq!(Duration::from_rank(8), None);
    }

    #[test]
    fn test_rank_orders_by_length() {
        assert!(Duration::Whole < Duration::Quarter);
        assert!(Duration::Quarter < Duration::HundredTwentyEighth);
    }
}
