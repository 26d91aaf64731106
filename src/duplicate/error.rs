use crate::model::{CoreError, PixelFormat};
use crate::store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DuplicateError>;

#[derive(Debug, Error)]
pub enum DuplicateError {
    #[error("invalid range for axis `{axis}`: [{min}, {max}] must satisfy 0 <= min <= max < {length}")]
    InvalidRange {
        axis: String,
        min: usize,
        max: usize,
        length: usize,
    },

    #[error("axis `{0}` can not be restricted: the source has no more than one index along it")]
    AxisNotAdjustable(String),

    #[error("unsupported pixel type {0:?}: only 8 or 16 bit grayscale images can be cropped")]
    UnsupportedPixelFormat(PixelFormat),

    #[error("region {region} does not overlap the {width}x{height} image")]
    EmptyCropRegion {
        region: String,
        width: usize,
        height: usize,
    },

    #[error("invalid region: {0}")]
    InvalidRoi(String),

    #[error("duplication recipe parse failure: {0}")]
    Recipe(String),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("pixel layout failure: {0}")]
    Layout(#[from] ndarray::ShapeError),

    #[error("duplication I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplication serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("duplication YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("duplication worker panicked")]
    WorkerPanicked,
}

impl DuplicateError {
    /// The message shown to a user when a run aborts.
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(StoreError::Frozen) => "Can not add data to frozen datastore".to_string(),
            Self::Store(StoreError::DuplicateCoordinate(_)) => "Can not overwrite data".to_string(),
            Self::UnsupportedPixelFormat(_) => {
                "Unsupported pixel type.  Can only copy 8 or 16 bit images.".to_string()
            }
            other => other.to_string(),
        }
    }
}
