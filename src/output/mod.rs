//! Output writers
//!
//! Serializers for the render grid. The grid itself is format-agnostic;
//! this module maps it to concrete markup.

pub mod html;

pub use html::render_html;
