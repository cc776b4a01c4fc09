//! Convert instrument-log text exports into trimmed spreadsheets.
//!
//! The pipeline reads a delimited `.txt`/`.csv` or `.his` log, finds the
//! header row by its `Date` field, builds a rectangular table, drops the
//! auxiliary time column, keeps the rows between the first and last nonzero
//! reading of the reference column, samples every k-th row and writes the
//! result as `.xlsx`.
pub mod config;
pub mod error;
pub mod export;
pub mod process;

pub use config::Config;
pub use error::ConvertError;
pub use process::{convert_file, prepare, ConversionReport, ConvertOptions};
