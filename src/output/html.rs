//! HTML page rendering
//!
//! Serializes a render grid into a minimal HTML page: a title and the
//! flattened grid inside a `<pre>` block, so the column alignment computed
//! by the layout survives as-is.

use crate::error::TabError;
use crate::layout::RenderGrid;
use serde::Serialize;

const STAFF_TEMPLATE: &str = include_str!("templates/staff.html.mustache");

/// Context data for template rendering
#[derive(Serialize)]
struct StaffContext {
    title: String,
    rows: Vec<StaffRow>,
}

#[derive(Serialize)]
struct StaffRow {
    line: String,
}

/// Render the grid into a complete HTML document
pub fn render_html(grid: &RenderGrid, title: &str) -> Result<String, TabError> {
    let template = mustache::compile_str(STAFF_TEMPLATE).map_err(|e| TabError::Template {
        reason: e.to_string(),
    })?;
    let context = StaffContext {
        title: title.to_string(),
        rows: grid
            .lines()
            .into_iter()
            .map(|line| StaffRow { line })
            .collect(),
    };
    template
        .render_to_string(&context)
        .map_err(|e| TabError::Template {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RenderRow, RowGroup};

    #[test]
    fn test_render_empty_grid() {
        let grid = RenderGrid::default();
        let html = render_html(&grid, "empty").unwrap();
        assert!(html.contains("<title>empty staff</title>"));
        assert!(html.contains("<pre>"));
    }

    #[test]
    fn test_rows_land_inside_pre() {
        let grid = RenderGrid {
            groups: vec![RowGroup {
                rows: vec![RenderRow::annotation("Chorus")],
            }],
        };
        let html = render_html(&grid, "song").unwrap();
        assert!(html.contains("Chorus\n"), "row text should be on its own line");
    }
}
