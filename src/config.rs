// src/config.rs
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::process::lines::TextEncoding;

/// Knobs for the whole pipeline. Every field has a default, so a YAML file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Literal header field marking the header row and the first kept column.
    pub sentinel: String,
    /// Candidate delimiters, tried in order on every line.
    pub delimiters: Vec<char>,
    /// Encodings tried in order by the line loader.
    pub encodings: Vec<TextEncoding>,
    /// Normalized prefix identifying the auxiliary time column.
    pub time_prefix: String,
    /// Trim column offset from the right for `.txt` / `.csv` files.
    pub delimited_offset: usize,
    /// Trim column offset from the right for `.his` files.
    pub his_offset: usize,
    /// Upper bound on the decimal places of a written number format.
    pub max_decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentinel: "Date".to_string(),
            delimiters: vec!['\t', ';', ','],
            encodings: TextEncoding::DEFAULT_PRIORITY.to_vec(),
            time_prefix: "time".to_string(),
            delimited_offset: 2,
            his_offset: 4,
            max_decimals: 6,
        }
    }
}

impl Config {
    /// Parse a YAML document, filling unspecified fields with defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Config =
            serde_yaml::from_str(text).map_err(|e| ConvertError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("{}: {}", path.display(), e)))?;
        let cfg = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sentinel.trim().is_empty() {
            return Err(ConvertError::Config("sentinel must not be empty".into()));
        }
        if self.delimiters.is_empty() {
            return Err(ConvertError::Config("at least one delimiter is required".into()));
        }
        if let Some(d) = self.delimiters.iter().find(|d| !d.is_ascii()) {
            return Err(ConvertError::Config(format!(
                "delimiter {d:?} is not a single-byte character"
            )));
        }
        if self.encodings.is_empty() {
            return Err(ConvertError::Config("at least one encoding is required".into()));
        }
        if self.delimited_offset == 0 || self.his_offset == 0 {
            return Err(ConvertError::Config(
                "column offsets count from 1 (the last column)".into(),
            ));
        }
        Ok(())
    }
}
