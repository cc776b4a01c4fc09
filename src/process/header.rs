// src/process/header.rs
use tracing::debug;

use crate::process::split::FieldSplitter;

/// Where the header row was found and how it splits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Index of the header line within the file.
    pub line_index: usize,
    /// Header fields from the sentinel through the end of the line, trimmed.
    pub fields: Vec<String>,
    /// Delimiter that produced the match.
    pub delimiter: char,
    /// Position of the sentinel within the raw split of the header line.
    pub offset: usize,
}

impl HeaderMatch {
    pub fn splitter(&self) -> FieldSplitter {
        FieldSplitter::new(self.delimiter)
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// Return the first line containing a field equal to `sentinel` under one of
/// `delimiters`. Delimiters are tried in order for each line before moving on
/// to the next one.
pub fn locate_header<S: AsRef<str>>(
    lines: &[S],
    delimiters: &[char],
    sentinel: &str,
) -> Option<HeaderMatch> {
    for (line_index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        // cheap pre-filter, a field equal to the sentinel must contain it
        if !line.contains(sentinel) {
            continue;
        }
        for &delimiter in delimiters {
            let raw = FieldSplitter::new(delimiter).split(line);
            if let Some(offset) = raw.iter().position(|f| f.trim() == sentinel) {
                let fields: Vec<String> =
                    raw[offset..].iter().map(|f| f.trim().to_string()).collect();
                debug!(
                    line_index,
                    delimiter = ?delimiter,
                    offset,
                    width = fields.len(),
                    "found header"
                );
                return Some(HeaderMatch {
                    line_index,
                    fields,
                    delimiter,
                    offset,
                });
            }
        }
    }
    None
}
