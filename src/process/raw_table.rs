// src/process/raw_table.rs
use tracing::debug;

use crate::process::header::HeaderMatch;

/// Rectangular table of trimmed string cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Column names, starting at the sentinel column.
    pub headers: Vec<String>,
    /// One entry per data line, each exactly `headers.len()` cells wide.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build the table from the lines that follow the header line.
    ///
    /// Every line becomes a row, blank ones included. Fields are sliced from
    /// the header offset, then padded with empty cells or truncated to the
    /// header width.
    pub fn from_lines<S: AsRef<str>>(header: &HeaderMatch, data_lines: &[S]) -> Self {
        let splitter = header.splitter();
        let width = header.width();

        let rows: Vec<Vec<String>> = data_lines
            .iter()
            .map(|line| {
                let fields = splitter.split(line.as_ref());
                let mut row: Vec<String> = fields
                    .iter()
                    .skip(header.offset)
                    .take(width)
                    .map(|f| f.trim().to_string())
                    .collect();
                row.resize(width, String::new());
                row
            })
            .collect();

        debug!(rows = rows.len(), width, "built table");
        Self {
            headers: header.fields.clone(),
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Drop column `idx` from the header and every row.
    pub fn remove_column(&mut self, idx: usize) -> Option<String> {
        if idx >= self.headers.len() {
            return None;
        }
        for row in &mut self.rows {
            row.remove(idx);
        }
        Some(self.headers.remove(idx))
    }

    /// Copy of rows `start..=end`, keeping the header.
    pub fn slice_rows(&self, start: usize, end: usize) -> RawTable {
        let end = end.min(self.rows.len().saturating_sub(1));
        let rows = if start <= end && start < self.rows.len() {
            self.rows[start..=end].to_vec()
        } else {
            Vec::new()
        };
        RawTable {
            headers: self.headers.clone(),
            rows,
        }
    }
}
