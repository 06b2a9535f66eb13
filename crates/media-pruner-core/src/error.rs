use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Invalid date in version: {0}")]
    InvalidDate(String),

    #[error("Invalid sequence version: {0}")]
    InvalidSequence(String),

    #[error("Cannot compare date versions with sequence versions")]
    IncomparableVersions,

    #[error("Mixed version types found for {base_name}")]
    MixedVersionFamilies {
        base_name: String,
        files: Vec<PathBuf>,
    },

    #[error("Must keep at least 1 version of each file, got {0}")]
    InvalidKeepCount(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Failures that only disqualify a single file; the scan carries on without it.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Error::InvalidVersionFormat(_) | Error::InvalidDate(_) | Error::InvalidSequence(_)
        )
    }
}
