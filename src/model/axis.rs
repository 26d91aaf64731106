use serde::{Deserialize, Serialize};

pub const CHANNEL: &str = "channel";
pub const TIME: &str = "time";
pub const Z: &str = "z";
pub const STAGE_POSITION: &str = "position";

/// Axes whose intended size is recomputed from a range selection.
pub const SIZE_AXES: [&str; 3] = [STAGE_POSITION, TIME, Z];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PixelFormat {
    #[default]
    Gray8,
    Gray16,
    Gray32Float,
    Rgb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Gray32Float => 4,
            Self::Rgb8 => 3,
        }
    }

    pub fn num_components(self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 | Self::Gray32Float => 1,
            Self::Rgb8 => 3,
        }
    }

    /// Only single-component integer formats can be cut to a region.
    pub fn is_croppable(self) -> bool {
        matches!(self, Self::Gray8 | Self::Gray16)
    }
}

/// Maps common short spellings onto the standard axis names.
pub fn canonical_axis(name: &str) -> String {
    match name.trim().to_ascii_lowercase().as_str() {
        "c" | "ch" | "channel" | "channels" => CHANNEL.to_string(),
        "t" | "time" | "frame" | "frames" => TIME.to_string(),
        "z" | "slice" | "slices" => Z.to_string(),
        "p" | "pos" | "position" | "stage_position" | "stageposition" => {
            STAGE_POSITION.to_string()
        }
        other => other.to_string(),
    }
}
