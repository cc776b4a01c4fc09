// src/process/mod.rs
//! Ingestion and trim pipeline: lines → header → table → column cleanup →
//! trim window → sampling.
pub mod columns;
pub mod header;
pub mod lines;
pub mod numeric;
pub mod raw_table;
pub mod sample;
pub mod split;
pub mod trimming;
pub mod utils;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::export::{format::ColumnKind, write_xlsx, SPREADSHEET_EXTENSION};
use raw_table::RawTable;
use trimming::TrimWindow;
use utils::{output_path_for, InputKind};

/// Caller choices for one run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub config: Config,
    /// Keep every `stride`-th row of the trimmed window.
    pub stride: usize,
    /// Override of the trim column offset; `None` uses the input kind default.
    pub offset: Option<usize>,
    /// Directory receiving the spreadsheet.
    pub out_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            config: Config::default(),
            stride: 1,
            offset: None,
            out_dir: PathBuf::from("."),
        }
    }
}

/// What a run detected and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub kind: InputKind,
    pub delimiter: char,
    pub header_line: usize,
    pub dropped_column: Option<String>,
    pub window: TrimWindow,
    pub offset: usize,
    pub stride: usize,
    pub table_rows: usize,
    pub rows_written: usize,
    pub column_kinds: Vec<ColumnKind>,
}

/// Trimmed, sampled table ready to be written, with its report.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub table: RawTable,
    pub report: ConversionReport,
}

/// Run every stage up to and including sampling, without touching the
/// output location.
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn prepare<P: AsRef<Path>>(path: P, opts: &ConvertOptions) -> Result<Prepared> {
    let path = path.as_ref();
    let lines = lines::read_lines(path, &opts.config.encodings)?;
    prepare_lines(&lines, path, opts)
}

/// Same as [`prepare`] over lines already in memory.
pub fn prepare_lines<S: AsRef<str>>(
    lines: &[S],
    path: &Path,
    opts: &ConvertOptions,
) -> Result<Prepared> {
    let cfg = &opts.config;
    if opts.stride == 0 {
        return Err(ConvertError::InvalidStride(opts.stride));
    }

    let header = header::locate_header(lines, &cfg.delimiters, &cfg.sentinel).ok_or_else(|| {
        ConvertError::HeaderNotFound {
            sentinel: cfg.sentinel.clone(),
        }
    })?;

    let data_lines = &lines[header.line_index + 1..];
    if data_lines.is_empty() {
        return Err(ConvertError::EmptyAfterHeader {
            header_line: header.line_index,
        });
    }

    let mut table = RawTable::from_lines(&header, data_lines);
    let dropped_column = columns::drop_time_column(&mut table, &cfg.sentinel, &cfg.time_prefix);
    if table.is_empty() {
        return Err(ConvertError::EmptyAfterNormalization);
    }

    let kind = InputKind::from_path(path);
    let offset = opts.offset.unwrap_or_else(|| kind.trim_offset(cfg));
    let window = trimming::find_trim_window(&table, offset, &cfg.sentinel).ok_or_else(|| {
        ConvertError::NoTrimAnchor {
            column: trimming::column_from_right(table.width(), offset)
                .map(|c| table.headers[c].clone())
                .unwrap_or_else(|| format!("<offset {offset} of {}>", table.width())),
        }
    })?;

    let trimmed = table.slice_rows(window.start, window.end);
    let sampled = RawTable {
        headers: trimmed.headers,
        rows: sample::every_kth(&trimmed.rows, opts.stride),
    };
    debug!(
        window_rows = window.row_count(),
        sampled_rows = sampled.len(),
        stride = opts.stride,
        "sampled window"
    );

    let report = ConversionReport {
        input: path.to_path_buf(),
        output: None,
        kind,
        delimiter: header.delimiter,
        header_line: header.line_index,
        dropped_column,
        offset,
        stride: opts.stride,
        table_rows: table.len(),
        rows_written: sampled.len(),
        column_kinds: Vec::new(),
        window,
    };
    Ok(Prepared {
        table: sampled,
        report,
    })
}

/// Convert one log file into a spreadsheet next to `opts.out_dir`.
///
/// Refuses to start when the input is missing or the output already exists;
/// in both cases nothing is written.
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn convert_file<P: AsRef<Path>>(path: P, opts: &ConvertOptions) -> Result<ConversionReport> {
    let path = path.as_ref();
    let start = Instant::now();

    if !path.is_file() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let output = output_path_for(path, &opts.out_dir, SPREADSHEET_EXTENSION);
    if output.exists() {
        return Err(ConvertError::OutputAlreadyExists { path: output });
    }

    let Prepared { table, mut report } = prepare(path, opts)?;
    report.column_kinds =
        write_xlsx(&table, &opts.config.sentinel, opts.config.max_decimals, &output)?;

    info!(
        output = %output.display(),
        start_row = report.window.start,
        end_row = report.window.end,
        column = %report.window.column_name,
        rows = report.rows_written,
        elapsed = ?start.elapsed(),
        "converted"
    );
    report.output = Some(output);
    Ok(report)
}
