//! Column sizing for the job table.

use crawldash_core::{JobRowView, COLUMNS};

use super::constants::{COLUMN_MAX, VIDEO_COLUMN_MAX};

pub type Widths = [usize; 4];

/// Widest cell per column, headings included, capped per column.
pub fn column_widths(rows: &[JobRowView]) -> Widths {
    let mut widths: Widths = COLUMNS.map(|title| title.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for (index, width) in widths.iter_mut().enumerate() {
        let cap = if index == 0 { VIDEO_COLUMN_MAX } else { COLUMN_MAX };
        *width = (*width).min(cap);
    }
    widths
}

/// Pads or cuts `cell` to exactly `width` characters.
pub fn fit(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len <= width {
        return format!("{cell:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = cell.chars().take(width - 1).collect();
    cut.push('~');
    cut
}
