use std::path::PathBuf;

use crate::formats::IoError;
use crate::model::{CoreError, Coords};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("datastore is frozen and can not accept new data")]
    Frozen,

    #[error("datastore already holds an image at {0}")]
    DuplicateCoordinate(Coords),

    #[error("summary metadata can not change after the first image was written")]
    MetadataFrozen,

    #[error("no image at {0}")]
    MissingImage(Coords),

    #[error("not a datastore directory: {0}")]
    NotAStore(PathBuf),

    #[error("datastore I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("datastore image encoding failure: {0}")]
    Format(#[from] IoError),

    #[error("datastore index serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("datastore image failure: {0}")]
    Core(#[from] CoreError),
}
