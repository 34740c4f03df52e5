//! Run configuration
//!
//! The configuration is resolved before parsing begins (from the config file
//! or built directly in tests) and is immutable for the run. Symbol sets are
//! runtime values, not compiled-in alphabets: the timing symbols and the
//! playing legend both come from here, and the classifier builds its regex
//! patterns from them.

use crate::error::TabError;
use crate::models::duration::Duration;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default ordered symbol list: tie, dot, whole..hundred-twenty-eighth
pub const DEFAULT_TIMING_SYMBOLS: &str = "+.WHQESTFO";

/// Parsed default symbol table, shared by [`Configuration::default`] and the
/// config file writer
pub static DEFAULT_SYMBOL_TABLE: Lazy<TimingSymbols> = Lazy::new(|| {
    TimingSymbols::from_ordered(DEFAULT_TIMING_SYMBOLS).expect("default timing symbols are valid")
});

/// The ordered ten-symbol timing table: tie marker, dot marker, then the
/// eight duration symbols in decreasing length order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimingSymbols {
    tie: char,
    dot: char,
    durations: [char; 8],
}

impl TimingSymbols {
    /// Build the table from a ten-character ordered string
    pub fn from_ordered(symbols: &str) -> Result<TimingSymbols, TabError> {
        let chars: Vec<char> = symbols.chars().collect();
        if chars.len() != 10 {
            return Err(TabError::ConfigValidation {
                reason: format!(
                    "timing symbols must be exactly 10 characters, got {}",
                    chars.len()
                ),
            });
        }
        let distinct: BTreeSet<char> = chars.iter().copied().collect();
        if distinct.len() != chars.len() {
            return Err(TabError::ConfigValidation {
                reason: format!("timing symbols {:?} contain duplicates", symbols),
            });
        }
        let mut durations = [' '; 8];
        durations.copy_from_slice(&chars[2..]);
        Ok(TimingSymbols {
            tie: chars[0],
            dot: chars[1],
            durations,
        })
    }

    pub fn tie(&self) -> char {
        self.tie
    }

    pub fn dot(&self) -> char {
        self.dot
    }

    /// Duration assigned to a symbol, if it is one of the eight duration symbols
    pub fn duration_for(&self, symbol: char) -> Option<Duration> {
        self.durations
            .iter()
            .position(|&c| c == symbol)
            .and_then(Duration::from_rank)
    }

    /// Symbol configured for a duration
    pub fn symbol_for(&self, duration: Duration) -> char {
        self.durations[duration.rank()]
    }

    /// All ten symbols in configured order
    pub fn all(&self) -> Vec<char> {
        let mut out = vec![self.tie, self.dot];
        out.extend_from_slice(&self.durations);
        out
    }

    /// Whether a character is any of the ten symbols
    pub fn contains(&self, c: char) -> bool {
        c == self.tie || c == self.dot || self.durations.contains(&c)
    }
}

/// Immutable settings for one run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Whether a timing line is expected above each group of string lines
    pub timing_supplied: bool,
    /// Number of separator characters between rendered notes
    pub gap_size: usize,
    /// Number of spaces a tab character expands to
    pub tab_spacing: usize,
    /// Whether non-musical text may appear in the input
    pub has_extra: bool,
    /// Whether extra text is carried into the output as annotations
    pub keep_extra: bool,
    /// Strict legacy string-line form (lane id required, no surrounding text)
    pub simple_string_lines: bool,
    /// Extra characters permitted in string lines (hammer-ons, bends, ...)
    pub playing_legend: BTreeSet<char>,
    /// The ordered ten-symbol timing table
    pub timing_symbols: TimingSymbols,
}

impl Configuration {
    /// Check the invariants the parser relies on. Called once before any
    /// classification happens.
    pub fn validate(&self) -> Result<(), TabError> {
        for &c in &self.playing_legend {
            if !c.is_alphabetic() {
                return Err(TabError::ConfigValidation {
                    reason: format!("playing legend character {:?} is not a letter", c),
                });
            }
        }
        for c in self.timing_symbols.all() {
            if c.is_whitespace() || c.is_ascii_digit() {
                return Err(TabError::ConfigValidation {
                    reason: format!(
                        "timing symbol {:?} may not be whitespace or a digit",
                        c
                    ),
                });
            }
            if self.playing_legend.contains(&c) {
                return Err(TabError::ConfigValidation {
                    reason: format!(
                        "timing symbol {:?} is also a playing legend character",
                        c
                    ),
                });
            }
        }
        if self.keep_extra && !self.has_extra {
            return Err(TabError::ConfigValidation {
                reason: "cannot keep extra text when the input is declared to have none"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Regex pattern matching a whole timing line: spaces and the ten
    /// configured symbols only
    pub fn timing_line_pattern(&self) -> String {
        let mut class = String::from(" ");
        for c in self.timing_symbols.all() {
            class.push_str(&regex::escape(&c.to_string()));
        }
        format!("^[{}]+$", class)
    }

    /// Regex pattern extracting the `|...|` string data segment of a relaxed
    /// string line, with leading and trailing text as the outer captures
    pub fn string_data_pattern(&self) -> String {
        let mut class = String::from(r"\d\-\|");
        for &c in &self.playing_legend {
            class.push_str(&regex::escape(&c.to_string()));
        }
        format!(r"^([^|]*)(\|[{}]+\|)(.*)$", class)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            timing_supplied: false,
            gap_size: 3,
            tab_spacing: 8,
            has_extra: true,
            keep_extra: true,
            simple_string_lines: false,
            playing_legend: BTreeSet::new(),
            timing_symbols: DEFAULT_SYMBOL_TABLE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbol_table() {
        let symbols = TimingSymbols::from_ordered(DEFAULT_TIMING_SYMBOLS).unwrap();
        assert_eq!(symbols.tie(), '+');
        assert_eq!(symbols.dot(), '.');
        assert_eq!(symbols.duration_for('W'), Some(Duration::Whole));
        assert_eq!(symbols.duration_for('Q'), Some(Duration::Quarter));
        assert_eq!(symbols.duration_for('O'), Some(Duration::HundredTwentyEighth));
        assert_eq!(symbols.duration_for('+'), None, "tie is not a duration");
        assert_eq!(symbols.symbol_for(Duration::Half), 'H');
    }

    #[test]
    fn test_symbols_must_be_ten_and_distinct() {
        assert!(TimingSymbols::from_ordered("+.WHQES").is_err());
        assert!(TimingSymbols::from_ordered("+.WHQESTFF").is_err());
    }

    #[test]
    fn test_keep_extra_requires_has_extra() {
        let config = Configuration {
            has_extra: false,
            keep_extra: true,
            ..Configuration::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TabError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_legend_must_be_letters() {
        let mut config = Configuration::default();
        config.playing_legend.insert('h');
        assert!(config.validate().is_ok());
        config.playing_legend.insert('*');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_symbols_disjoint_from_legend() {
        let mut config = Configuration::default();
        config.playing_legend.insert('W');
        assert!(config.validate().is_err());
    }
}
