// src/process/split.rs
use csv::{ReaderBuilder, StringRecord};
use tracing::trace;

/// Quote-aware splitter for a single log line.
///
/// Lines are split one at a time so that row numbers always follow file
/// lines, even when a quote is left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSplitter {
    delimiter: u8,
}

impl FieldSplitter {
    /// `delimiter` must be an ASCII character; anything else falls back to a
    /// comma (the config layer rejects non-ASCII delimiters up front).
    pub fn new(delimiter: char) -> Self {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',');
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        char::from(self.delimiter)
    }

    /// Split `line` into raw (untrimmed) fields. An empty line has no fields.
    pub fn split(&self, line: &str) -> Vec<String> {
        if line.is_empty() {
            return Vec::new();
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .buffer_capacity(line.len().max(64))
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        match rdr.read_record(&mut record) {
            Ok(true) => record.iter().map(str::to_string).collect(),
            Ok(false) => Vec::new(),
            Err(e) => {
                trace!(error = %e, "csv split failed, using plain split");
                line.split(self.delimiter()).map(str::to_string).collect()
            }
        }
    }
}
