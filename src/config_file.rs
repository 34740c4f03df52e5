//! Configuration file loading
//!
//! The config file is a fixed-order list of `OPTION=value` lines. Comment
//! lines start with `#`, trailing `#` comments are stripped, and interior
//! whitespace is ignored. A missing file is rebuilt with the documented
//! defaults and then read back, so a run always has a configuration.

use crate::error::TabError;
use crate::models::config::{Configuration, TimingSymbols, DEFAULT_TIMING_SYMBOLS};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Fixed config file name, looked up in the working directory by default
pub const CONFIG_FILENAME: &str = "tabstaff.config";

const COMMENT: char = '#';
const SETTING_YES: &str = "true";
const SETTING_NO: &str = "false";

/// The configuration options, in file order. Each option's position is its
/// line number among the non-comment lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigOption {
    TimingSupplied,
    Gapsize,
    TabSpacing,
    HasExtra,
    PlayingLegend,
    TimingSymbols,
    KeepExtra,
    SimpleStringLines,
}

impl ConfigOption {
    const ALL: [ConfigOption; 8] = [
        ConfigOption::TimingSupplied,
        ConfigOption::Gapsize,
        ConfigOption::TabSpacing,
        ConfigOption::HasExtra,
        ConfigOption::PlayingLegend,
        ConfigOption::TimingSymbols,
        ConfigOption::KeepExtra,
        ConfigOption::SimpleStringLines,
    ];

    fn name(self) -> &'static str {
        match self {
            ConfigOption::TimingSupplied => "TIMING_SUPPLIED",
            ConfigOption::Gapsize => "GAPSIZE",
            ConfigOption::TabSpacing => "TAB_SPACING",
            ConfigOption::HasExtra => "HAS_EXTRA",
            ConfigOption::PlayingLegend => "PLAYING_LEGEND",
            ConfigOption::TimingSymbols => "TIMING_SYMBOLS",
            ConfigOption::KeepExtra => "KEEP_EXTRA",
            ConfigOption::SimpleStringLines => "SIMPLE_STRING_LINES",
        }
    }

    fn default_value(self) -> String {
        match self {
            ConfigOption::TimingSupplied => SETTING_NO.to_string(),
            ConfigOption::Gapsize => "3".to_string(),
            ConfigOption::TabSpacing => "8".to_string(),
            ConfigOption::HasExtra => SETTING_YES.to_string(),
            ConfigOption::PlayingLegend => String::new(),
            ConfigOption::TimingSymbols => DEFAULT_TIMING_SYMBOLS.to_string(),
            ConfigOption::KeepExtra => SETTING_YES.to_string(),
            ConfigOption::SimpleStringLines => SETTING_NO.to_string(),
        }
    }

    /// 1-based option line number, used in error reports
    fn line(self) -> usize {
        ConfigOption::ALL
            .iter()
            .position(|o| *o == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

/// Load the config file at `path`, creating it with defaults first when it
/// does not exist. Returns the configuration and whether the default file
/// was created.
pub fn load_or_create(path: &Path) -> Result<(Configuration, bool), TabError> {
    if path.is_file() {
        let text = fs::read_to_string(path)
            .map_err(|e| TabError::io("opening the config file", e))?;
        let config = parse_config_text(&text)?;
        config.validate()?;
        Ok((config, false))
    } else {
        log::warn!(
            "config file {} not found, writing defaults",
            path.display()
        );
        fs::write(path, default_config_text())
            .map_err(|e| TabError::io("creating the default config file", e))?;
        let config = parse_config_text(&default_config_text())?;
        config.validate()?;
        Ok((config, true))
    }
}

/// Parse config file text into a configuration. Validation of the symbol
/// sets happens separately through [`Configuration::validate`].
pub fn parse_config_text(text: &str) -> Result<Configuration, TabError> {
    let mut option_lines = Vec::new();
    for line in text.lines() {
        // collapse interior whitespace, then strip trailing comments
        let mut joined: String = line.split_whitespace().collect();
        if let Some(idx) = joined.find(COMMENT) {
            joined.truncate(idx);
        }
        if !joined.is_empty() {
            option_lines.push(joined);
        }
    }

    let mut settings = Vec::new();
    for option in ConfigOption::ALL {
        let line = option_lines.get(option.line() - 1).ok_or_else(|| {
            TabError::ConfigFile {
                line: option.line(),
                reason: format!(
                    "config file too small, option {} not found",
                    option.name()
                ),
            }
        })?;
        let value = line
            .strip_prefix(option.name())
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(|| TabError::ConfigFile {
                line: option.line(),
                reason: format!("expected {}=<value>", option.name()),
            })?;
        settings.push(value.to_string());
    }

    let config = Configuration {
        timing_supplied: parse_bool(ConfigOption::TimingSupplied, &settings[0])?,
        gap_size: parse_uint(ConfigOption::Gapsize, &settings[1])?,
        tab_spacing: parse_uint(ConfigOption::TabSpacing, &settings[2])?,
        has_extra: parse_bool(ConfigOption::HasExtra, &settings[3])?,
        playing_legend: settings[4].chars().collect::<BTreeSet<char>>(),
        timing_symbols: parse_symbols(ConfigOption::TimingSymbols, &settings[5])?,
        keep_extra: parse_bool(ConfigOption::KeepExtra, &settings[6])?,
        simple_string_lines: parse_bool(ConfigOption::SimpleStringLines, &settings[7])?,
    };
    Ok(config)
}

/// Default config file contents: a comment header plus every option at its
/// default value
pub fn default_config_text() -> String {
    let mut out = String::from(
        "# Configuration file for tabstaff.\n\
         # Comment lines start with '#'; text after a '#' on an option line is ignored.\n\
         # TIMING_SUPPLIED: whether a timing line sits above each group of string lines\n\
         # GAPSIZE: number of separator characters between rendered notes\n\
         # TAB_SPACING: number of spaces a tab character expands to\n\
         # HAS_EXTRA: whether non-musical text may appear in the input\n\
         # PLAYING_LEGEND: extra letters allowed in string lines (h, p, b, ...)\n\
         # TIMING_SYMBOLS: tie, dot, then whole..128th note symbols, 10 unique characters\n\
         # KEEP_EXTRA: whether extra text is carried into the output\n\
         # SIMPLE_STRING_LINES: strict legacy string line form\n",
    );
    for option in ConfigOption::ALL {
        out.push_str(option.name());
        out.push('=');
        out.push_str(&option.default_value());
        out.push('\n');
    }
    out
}

fn parse_bool(option: ConfigOption, value: &str) -> Result<bool, TabError> {
    match value {
        SETTING_YES => Ok(true),
        SETTING_NO => Ok(false),
        other => Err(TabError::ConfigFile {
            line: option.line(),
            reason: format!(
                "setting {:?} for option {} must be {} or {}",
                other,
                option.name(),
                SETTING_YES,
                SETTING_NO
            ),
        }),
    }
}

fn parse_uint(option: ConfigOption, value: &str) -> Result<usize, TabError> {
    value.parse::<usize>().map_err(|_| TabError::ConfigFile {
        line: option.line(),
        reason: format!(
            "setting {:?} for option {} must be a non-negative integer",
            value,
            option.name()
        ),
    })
}

fn parse_symbols(option: ConfigOption, value: &str) -> Result<TimingSymbols, TabError> {
    TimingSymbols::from_ordered(value).map_err(|e| TabError::ConfigFile {
        line: option.line(),
        reason: e.to_string(),
    })
}
