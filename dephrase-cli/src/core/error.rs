use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DephraseError {
    #[error("Cannot access directory {path}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from} to {to}: {reason}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Failed to write report {path}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DephraseError>;
