//! Line classification
//!
//! Classifies one raw input line as blank, timing, string data, or extra
//! text, after right-trimming and tab expansion. The character classes are
//! built at run time from the configured timing symbols and playing legend.

use crate::error::TabError;
use crate::models::config::Configuration;
use crate::parse::RawLine;
use regex::Regex;

/// Classification result for one line
#[derive(Clone, Debug, PartialEq)]
pub enum LineKind {
    Blank,
    /// A timing line: spaces and timing symbols only, right-trimmed and
    /// tab-expanded
    Timing(String),
    StringLine(StringLineData),
    /// Non-musical text, right-trimmed and tab-expanded
    Extra(String),
}

/// A recognized string line, split into its data segment and surroundings
#[derive(Clone, Debug, PartialEq)]
pub struct StringLineData {
    /// Lane identifier character as written, when one was present
    pub lane_char: Option<char>,
    /// The `|...|` data segment (legacy form keeps the lane id prefix)
    pub content: String,
    /// Text before the data segment, lane id and whitespace stripped
    pub leading: String,
    /// Text after the data segment
    pub trailing: String,
    /// Columns removed from the front of the line, used to re-align the
    /// timing row above
    pub indent: usize,
}

/// Expand tab characters to the next multiple of `tab_size` columns
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    if tab_size == 0 {
        return text.replace('\t', "");
    }
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        if c == '\t' {
            let pad = tab_size - (column % tab_size);
            for _ in 0..pad {
                out.push(' ');
            }
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Classifies raw lines under one configuration
pub struct LineClassifier<'a> {
    config: &'a Configuration,
    timing_re: Regex,
    string_data_re: Regex,
}

impl<'a> LineClassifier<'a> {
    pub fn new(config: &'a Configuration) -> Result<Self, TabError> {
        let timing_re =
            Regex::new(&config.timing_line_pattern()).map_err(|e| TabError::ConfigValidation {
                reason: format!("timing symbols build an invalid pattern: {}", e),
            })?;
        let string_data_re =
            Regex::new(&config.string_data_pattern()).map_err(|e| TabError::ConfigValidation {
                reason: format!("playing legend builds an invalid pattern: {}", e),
            })?;
        Ok(LineClassifier {
            config,
            timing_re,
            string_data_re,
        })
    }

    /// Classify one line. `timing_expected` is true only where a block may
    /// begin; elsewhere a timing-shaped line is just text between strings.
    pub fn classify(&self, line: &RawLine, timing_expected: bool) -> Result<LineKind, TabError> {
        let expanded = expand_tabs(line.text.trim_end(), self.config.tab_spacing);
        if expanded.trim().is_empty() {
            return Ok(LineKind::Blank);
        }

        if self.config.timing_supplied && timing_expected && self.timing_re.is_match(&expanded) {
            log::debug!("line {}: timing line", line.index);
            return Ok(LineKind::Timing(expanded));
        }

        if let Some(data) = self.check_string_line(&expanded) {
            log::debug!(
                "line {}: string line (lane id {:?})",
                line.index,
                data.lane_char
            );
            return Ok(LineKind::StringLine(data));
        }

        if self.config.has_extra {
            Ok(LineKind::Extra(expanded))
        } else {
            Err(TabError::UnexpectedExtraText {
                line: line.index,
                text: expanded,
            })
        }
    }

    fn check_string_line(&self, expanded: &str) -> Option<StringLineData> {
        if self.config.simple_string_lines {
            self.check_legacy_string_line(expanded)
        } else {
            self.check_relaxed_string_line(expanded)
        }
    }

    /// Legacy form: optional surrounding whitespace only, lane id or bare
    /// `|` start, minimum 4 characters
    fn check_legacy_string_line(&self, expanded: &str) -> Option<StringLineData> {
        let trimmed = expanded.trim_start();
        let indent = expanded.chars().count() - trimmed.chars().count();
        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() < 4 {
            return None;
        }
        let (lane_char, body_start) = if chars[0] == '|' {
            (None, 0)
        } else if crate::models::Lane::from_id(chars[0]).is_some() && chars[1] == '|' {
            (Some(chars[0]), 1)
        } else {
            return None;
        };
        if *chars.last().unwrap_or(&' ') != '|' {
            return None;
        }
        if !chars[body_start..].iter().all(|&c| self.is_string_char(c)) {
            return None;
        }
        Some(StringLineData {
            lane_char,
            content: trimmed.to_string(),
            leading: String::new(),
            trailing: String::new(),
            indent,
        })
    }

    /// Relaxed form: the first `|...|` segment is the data, text around it
    /// goes to the side channel
    fn check_relaxed_string_line(&self, expanded: &str) -> Option<StringLineData> {
        let captures = self.string_data_re.captures(expanded)?;
        let leading_raw = captures.get(1).map_or("", |m| m.as_str());
        let content = captures.get(2).map_or("", |m| m.as_str());
        let trailing = captures.get(3).map_or("", |m| m.as_str());
        if content.chars().count() < 3 {
            return None;
        }
        let indent = leading_raw.chars().count();
        let (leading, lane_char) = split_lane_name(leading_raw);
        Some(StringLineData {
            lane_char,
            content: content.to_string(),
            leading,
            trailing: trailing.to_string(),
            indent,
        })
    }

    fn is_string_char(&self, c: char) -> bool {
        c == '|' || c == '-' || c.is_ascii_digit() || self.config.playing_legend.contains(&c)
    }
}

/// Split a trailing lane-name character off leading text. The name must be
/// the last character and either stand alone or follow whitespace
/// (`Verse 1 G|...` names the G lane; `RiffG|...` does not).
fn split_lane_name(leading: &str) -> (String, Option<char>) {
    let chars: Vec<char> = leading.chars().collect();
    if let Some(&last) = chars.last() {
        let preceded_ok = chars.len() == 1 || chars[chars.len() - 2].is_whitespace();
        if last.is_alphabetic() && preceded_ok {
            let stripped: String = chars[..chars.len() - 1].iter().collect();
            return (stripped.trim().to_string(), Some(last));
        }
    }
    (leading.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(config: &Configuration, text: &str, timing_expected: bool) -> LineKind {
        let classifier = LineClassifier::new(config).unwrap();
        classifier
            .classify(
                &RawLine {
                    index: 1,
                    text: text.to_string(),
                },
                timing_expected,
            )
            .unwrap()
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tQ", 4), "    Q");
        assert_eq!(expand_tabs("ab\tc", 4), "ab  c");
        assert_eq!(expand_tabs("ab\tc", 0), "abc");
    }

    #[test]
    fn test_blank_line() {
        let config = Configuration::default();
        assert_eq!(classify(&config, "   \t ", false), LineKind::Blank);
    }

    #[test]
    fn test_relaxed_string_line_with_surroundings() {
        let config = Configuration::default();
        match classify(&config, "Verse 1 G|--1--| cool riff", false) {
            LineKind::StringLine(data) => {
                assert_eq!(data.lane_char, Some('G'));
                assert_eq!(data.content, "|--1--|");
                assert_eq!(data.leading, "Verse 1");
                assert_eq!(data.trailing, " cool riff");
                assert_eq!(data.indent, 9, "indent covers text and lane id");
            }
            other => panic!("expected string line, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_string_line() {
        let config = Configuration {
            simple_string_lines: true,
            ..Configuration::default()
        };
        match classify(&config, "  G|1---|", false) {
            LineKind::StringLine(data) => {
                assert_eq!(data.lane_char, Some('G'));
                assert_eq!(data.content, "G|1---|");
                assert_eq!(data.indent, 2);
            }
            other => panic!("expected string line, got {:?}", other),
        }
        // too short for the legacy form
        assert!(matches!(classify(&config, "G||", false), LineKind::Extra(_)));
    }

    #[test]
    fn test_minimum_relaxed_length() {
        let config = Configuration::default();
        assert!(matches!(
            classify(&config, "|1|", false),
            LineKind::StringLine(_)
        ));
        assert!(matches!(classify(&config, "||", false), LineKind::Extra(_)));
    }

    #[test]
    fn test_timing_line_only_where_expected() {
        let config = Configuration {
            timing_supplied: true,
            ..Configuration::default()
        };
        assert_eq!(
            classify(&config, "  Q +.", true),
            LineKind::Timing("  Q +.".to_string())
        );
        assert!(matches!(classify(&config, "  Q +.", false), LineKind::Extra(_)));
    }

    #[test]
    fn test_playing_legend_chars_allowed() {
        let mut config = Configuration::default();
        config.playing_legend.insert('h');
        assert!(matches!(
            classify(&config, "G|2h3--|", false),
            LineKind::StringLine(_)
        ));
    }

    #[test]
    fn test_unexpected_extra_text_fails() {
        let config = Configuration {
            has_extra: false,
            keep_extra: false,
            ..Configuration::default()
        };
        let classifier = LineClassifier::new(&config).unwrap();
        let err = classifier
            .classify(
                &RawLine {
                    index: 7,
                    text: "just some words".to_string(),
                },
                false,
            )
            .unwrap_err();
        assert!(matches!(err, TabError::UnexpectedExtraText { line: 7, .. }));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let config = Configuration::default();
        let first = classify(&config, "D|--3--|", false);
        let second = classify(&config, "D|--3--|", false);
        assert_eq!(first, second);
    }
}
