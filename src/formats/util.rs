use std::path::Path;

use crate::model::ImageMetadata;

use super::{IoError, Result};

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    Ok(ext)
}

pub(crate) fn source_metadata(path: &Path, page: usize) -> ImageMetadata {
    let mut metadata = ImageMetadata::new();
    metadata.insert(
        "source".to_string(),
        serde_json::Value::String(path.display().to_string()),
    );
    metadata.insert("page".to_string(), serde_json::Value::from(page));
    metadata
}
