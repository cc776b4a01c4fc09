// src/process/utils.rs
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Input layouts differ only in where the trim reference column sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `.txt` / `.csv` exports.
    Delimited,
    /// `.his` history logs.
    His,
}

impl InputKind {
    /// Decide the kind from the file extension; anything that is not `.his`
    /// is read as a delimited export.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("his") => InputKind::His,
            _ => InputKind::Delimited,
        }
    }

    /// Offset from the right of the trim reference column.
    pub fn trim_offset(self, cfg: &Config) -> usize {
        match self {
            InputKind::Delimited => cfg.delimited_offset,
            InputKind::His => cfg.his_offset,
        }
    }
}

/// Output path for `input`: its base name with `extension`, inside `out_dir`.
pub fn output_path_for(input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{stem}.{extension}"))
}
