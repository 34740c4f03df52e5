//! Command-line interface for tabstaff
//!
//! Usage:
//!   tabstaff `<input>` [--config `<path>`] [--json]
//!
//! Reads a tab file, parses and renders it, and writes the sheet music as
//! `<input-stem>_staff.html` next to the input. With `--json` the render
//! grid is additionally dumped as `<input-stem>_grid.json`. Progress and
//! errors are logged to `tabstaff.log` in the working directory.

use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tabstaff::config_file::{self, CONFIG_FILENAME};
use tabstaff::error::TabError;
use tabstaff::layout;
use tabstaff::output;
use tabstaff::parse;

const LOG_FILENAME: &str = "tabstaff.log";

fn main() {
    let matches = Command::new("tabstaff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts plain-text bass tablature into staff notation")
        .arg(
            Arg::new("input")
                .help("Path to the input tab file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the configuration file (default: tabstaff.config)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Also dump the render grid as JSON"),
        )
        .get_matches();

    init_file_logger();

    let input = matches.get_one::<String>("input").unwrap();
    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let dump_json = matches.get_flag("json");

    if let Err(e) = run(Path::new(input), &config_path, dump_json) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_file_logger() {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILENAME);
    match file {
        Ok(file) => {
            let config = ConfigBuilder::new().build();
            if let Err(e) = WriteLogger::init(LevelFilter::Info, config, file) {
                eprintln!("warning: could not install logger: {}", e);
            }
        }
        Err(e) => eprintln!("warning: could not open {}: {}", LOG_FILENAME, e),
    }
}

fn run(input: &Path, config_path: &Path, dump_json: bool) -> Result<(), TabError> {
    log::info!("reading tab file {}", input.display());

    let (config, created) = config_file::load_or_create(config_path)?;
    if created {
        log::warn!(
            "config file was not found; default configuration was created and read instead"
        );
    } else {
        log::info!("configuration loaded from {}", config_path.display());
    }

    let text = std::fs::read_to_string(input)
        .map_err(|e| TabError::io("opening the tab file", e))?;
    let lines = parse::raw_lines(&text);

    let (song, summary) = parse::parse_song(&lines, &config)?;
    if song.is_empty() {
        log::warn!("no string blocks were recognized; the output will be empty");
    }

    let grid = layout::render(&song, &config);

    let title = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tab".to_string());
    let html = output::render_html(&grid, &title)?;
    let html_path = sibling_path(input, "_staff.html");
    std::fs::write(&html_path, html)
        .map_err(|e| TabError::io("writing the HTML file", e))?;
    log::info!("wrote {}", html_path.display());

    if dump_json {
        let json = serde_json::to_string_pretty(&grid).map_err(|e| TabError::Template {
            reason: e.to_string(),
        })?;
        let json_path = sibling_path(input, "_grid.json");
        std::fs::write(&json_path, json)
            .map_err(|e| TabError::io("writing the JSON grid", e))?;
        log::info!("wrote {}", json_path.display());
    }

    log::info!(
        "done: {} lines loaded, {} parsed, {} string/timing lines, {} measures",
        summary.lines_loaded,
        summary.lines_parsed,
        summary.string_timing_lines,
        summary.measures
    );
    println!(
        "{}: {} measures from {} lines -> {}",
        title,
        summary.measures,
        summary.lines_loaded,
        html_path.display()
    );
    Ok(())
}

/// Build an output path next to the input: stem plus suffix
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tab".to_string());
    input.with_file_name(format!("{}{}", stem, suffix))
}
