// Configuration file loading tests, using a temp directory for the
// create-on-missing behavior.

use tabstaff::config_file::{default_config_text, load_or_create, parse_config_text};
use tabstaff::error::TabError;
use tabstaff::models::{Configuration, Duration};

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tabstaff.config");

    let (config, created) = load_or_create(&path).unwrap();
    assert!(created, "a default file should have been written");
    assert!(path.is_file());
    assert_eq!(config, Configuration::default());

    // a second load reads the file that was just written
    let (config_again, created_again) = load_or_create(&path).unwrap();
    assert!(!created_again);
    assert_eq!(config_again, config);
}

#[test]
fn test_default_text_round_trips() {
    let config = parse_config_text(&default_config_text()).unwrap();
    assert_eq!(config, Configuration::default());
}

#[test]
fn test_custom_settings_with_comments_and_spacing() {
    let text = "\
# leading comment
TIMING_SUPPLIED = true
GAPSIZE=2 # two dashes between notes
TAB_SPACING=4
HAS_EXTRA=false
PLAYING_LEGEND=hpb
TIMING_SYMBOLS=+.WHQESTFO
KEEP_EXTRA=false
SIMPLE_STRING_LINES=true
";
    let config = parse_config_text(text).unwrap();
    assert!(config.timing_supplied);
    assert_eq!(config.gap_size, 2);
    assert_eq!(config.tab_spacing, 4);
    assert!(!config.has_extra);
    assert!(config.playing_legend.contains(&'h'));
    assert!(config.playing_legend.contains(&'b'));
    assert!(!config.keep_extra);
    assert!(config.simple_string_lines);
    assert_eq!(
        config.timing_symbols.duration_for('E'),
        Some(Duration::Eighth)
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_bad_boolean_reports_the_option_line() {
    let mut text = default_config_text();
    text = text.replace("TIMING_SUPPLIED=false", "TIMING_SUPPLIED=maybe");
    let err = parse_config_text(&text).unwrap_err();
    assert!(matches!(err, TabError::ConfigFile { line: 1, .. }));
}

#[test]
fn test_wrong_option_name_fails() {
    let mut text = default_config_text();
    text = text.replace("GAPSIZE=3", "GAP=3");
    let err = parse_config_text(&text).unwrap_err();
    assert!(matches!(err, TabError::ConfigFile { line: 2, .. }));
}

#[test]
fn test_truncated_file_fails() {
    let err = parse_config_text("TIMING_SUPPLIED=false\n").unwrap_err();
    assert!(matches!(err, TabError::ConfigFile { .. }));
}

#[test]
fn test_conflicting_extra_settings_fail_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tabstaff.config");
    let mut text = default_config_text();
    text = text.replace("HAS_EXTRA=true", "HAS_EXTRA=false");
    std::fs::write(&path, text).unwrap();

    let err = load_or_create(&path).unwrap_err();
    assert!(
        matches!(err, TabError::ConfigValidation { .. }),
        "keeping extra text without any requires a validation failure"
    );
}
