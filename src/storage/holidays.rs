//! Holiday rule file reader
//!
//! Reads comma-separated rule lines into [`RuleRecord`]s. Quoting follows
//! CSV rules so labels may contain commas; `#` starts a comment line.
//! Interpreting the fields is left to the domain parser.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::RuleRecord;

#[derive(Debug, Error)]
pub enum HolidayFileError {
    #[error("Holiday file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read holiday file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid holiday file: {0}")]
    Csv(#[from] csv::Error),
}

/// Reader for holiday rule files
pub struct HolidayFile;

impl HolidayFile {
    /// Loads every record from the file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<RuleRecord>, HolidayFileError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(HolidayFileError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| HolidayFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Reads records from any byte source
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RuleRecord>, HolidayFileError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(records.len() + 1);
            let fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            records.push(RuleRecord::new(line, fields));
        }

        Ok(records)
    }
}
