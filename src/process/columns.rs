// src/process/columns.rs
use tracing::info;

use crate::process::raw_table::RawTable;

/// Lower-case `name` and keep only alphanumeric characters, so that
/// `"Time (s)"`, `"TIME_S"` and `"time[s]"` all normalize alike.
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Index of the first column, other than `sentinel_idx`, whose normalized
/// name starts with `prefix`.
pub fn find_time_column(headers: &[String], sentinel_idx: usize, prefix: &str) -> Option<usize> {
    let prefix = normalize_column_name(prefix);
    headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != sentinel_idx)
        .find(|(_, h)| normalize_column_name(h).starts_with(&prefix))
        .map(|(i, _)| i)
}

/// Remove the auxiliary time column when the table also has the sentinel
/// date column. Only the first match is removed. Returns the dropped name.
pub fn drop_time_column(table: &mut RawTable, sentinel: &str, prefix: &str) -> Option<String> {
    let sentinel_idx = table.column_index(sentinel)?;
    let idx = find_time_column(&table.headers, sentinel_idx, prefix)?;
    let removed = table.remove_column(idx)?;
    info!(column = %removed, "dropped time column");
    Some(removed)
}
