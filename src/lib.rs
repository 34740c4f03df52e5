//! tabstaff
//!
//! Converts plain-text bass tablature (four string lanes G,D,A,E with an
//! optional timing line above each group) into a measure/note model, then
//! into a column-aligned grid of notation glyphs ready for markup
//! serialization.
//!
//! The core pipeline is [`parse::parse_song`] followed by
//! [`layout::render`]; [`output::render_html`] serializes the resulting
//! grid into a minimal HTML page.

pub mod config_file;
pub mod error;
pub mod layout;
pub mod models;
pub mod output;
pub mod parse;

// Re-export commonly used types
pub use error::TabError;
pub use layout::{render, RenderGrid};
pub use models::{Configuration, Duration, Lane, Song};
pub use parse::{parse_song, raw_lines, ParseSummary, RawLine};
