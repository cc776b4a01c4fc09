// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a single conversion run.
///
/// All variants are terminal for the run: nothing is retried and, for every
/// failure detected before the write step, no output file is created.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no header line containing the field '{sentinel}' was found")]
    HeaderNotFound { sentinel: String },

    #[error("no data lines follow the header (line {header_line})")]
    EmptyAfterHeader { header_line: usize },

    #[error("table is empty after column normalization")]
    EmptyAfterNormalization,

    #[error("no nonzero value in column '{column}' or in any fallback column")]
    NoTrimAnchor { column: String },

    #[error("output file {} already exists, refusing to overwrite", path.display())]
    OutputAlreadyExists { path: PathBuf },

    #[error("failed to write {}: {message}", path.display())]
    WriteFailure { path: PathBuf, message: String },

    #[error("sampling stride must be at least 1, got {0}")]
    InvalidStride(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// Stable short tag, handy for logs and for matching in tests.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::FileNotFound { .. } => "file_not_found",
            ConvertError::UnreadableFile { .. } => "unreadable_file",
            ConvertError::HeaderNotFound { .. } => "header_not_found",
            ConvertError::EmptyAfterHeader { .. } => "empty_after_header",
            ConvertError::EmptyAfterNormalization => "empty_after_normalization",
            ConvertError::NoTrimAnchor { .. } => "no_trim_anchor",
            ConvertError::OutputAlreadyExists { .. } => "output_already_exists",
            ConvertError::WriteFailure { .. } => "write_failure",
            ConvertError::InvalidStride(_) => "invalid_stride",
            ConvertError::Config(_) => "config",
        }
    }

    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::UnreadableFile {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = ConvertError::OutputAlreadyExists {
            path: PathBuf::from("run.xlsx"),
        };
        assert_eq!(
            err.to_string(),
            "output file run.xlsx already exists, refusing to overwrite"
        );
        assert_eq!(err.kind(), "output_already_exists");

        let err = ConvertError::NoTrimAnchor {
            column: "Temp".into(),
        };
        assert!(err.to_string().contains("'Temp'"));
    }

    #[test]
    fn test_unreadable_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConvertError::unreadable("log.txt", io);
        assert_eq!(err.kind(), "unreadable_file");
        assert!(std::error::Error::source(&err).is_some());
    }
}
