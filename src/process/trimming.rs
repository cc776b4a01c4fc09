// src/process/trimming.rs
use tracing::{debug, warn};

use crate::process::numeric::numeric_view;
use crate::process::raw_table::RawTable;

/// Inclusive row range bounded by the first and last nonzero reading of the
/// column that anchored it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimWindow {
    pub start: usize,
    pub end: usize,
    /// Index of the anchoring column in the table.
    pub column: usize,
    pub column_name: String,
    /// `false` when the designated column anchored the window.
    pub used_fallback: bool,
}

impl TrimWindow {
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Column index `offset` places from the right edge (1 = last column).
pub fn column_from_right(width: usize, offset: usize) -> Option<usize> {
    if offset == 0 || offset > width {
        None
    } else {
        Some(width - offset)
    }
}

/// First and last row whose cell in `column` is a nonzero number.
pub fn nonzero_bounds(table: &RawTable, column: usize) -> Option<(usize, usize)> {
    let view = numeric_view(table.column(column));
    let nonzero = |v: &Option<f64>| matches!(v, Some(x) if *x != 0.0);
    let start = view.iter().position(nonzero)?;
    let end = view.iter().rposition(nonzero)?;
    Some((start, end))
}

/// Compute the trim window.
///
/// The designated column sits `offset` places from the right. If it does not
/// exist or never holds a nonzero value, the remaining columns are scanned
/// right to left, skipping `sentinel`, and the first one with a nonzero value
/// anchors the window instead.
pub fn find_trim_window(table: &RawTable, offset: usize, sentinel: &str) -> Option<TrimWindow> {
    let primary = column_from_right(table.width(), offset);
    let sentinel_idx = table.column_index(sentinel);

    if let Some(col) = primary {
        if let Some((start, end)) = nonzero_bounds(table, col) {
            debug!(column = %table.headers[col], start, end, "trim window from designated column");
            return Some(TrimWindow {
                start,
                end,
                column: col,
                column_name: table.headers[col].clone(),
                used_fallback: false,
            });
        }
    }

    warn!(
        offset,
        column = primary.map(|c| table.headers[c].as_str()).unwrap_or("<none>"),
        "designated column has no nonzero value, scanning other columns"
    );

    (0..table.width())
        .rev()
        .filter(|&c| Some(c) != primary && Some(c) != sentinel_idx)
        .find_map(|c| {
            nonzero_bounds(table, c).map(|(start, end)| TrimWindow {
                start,
                end,
                column: c,
                column_name: table.headers[c].clone(),
                used_fallback: true,
            })
        })
        .inspect(|w| {
            debug!(
                column = %w.column_name,
                start = w.start,
                end = w.end,
                "trim window from fallback column"
            );
        })
}
