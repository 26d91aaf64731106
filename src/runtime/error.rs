use std::path::PathBuf;

use crate::duplicate::DuplicateError;
use crate::formats::IoError;
use crate::store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("store service error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O service error: {0}")]
    Io(#[from] IoError),

    #[error("duplication service error: {0}")]
    Duplicate(#[from] DuplicateError),

    #[error("preferences file {path}: {source}")]
    PreferencesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {path} is not valid JSON: {source}")]
    PreferencesFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
