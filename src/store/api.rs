use std::path::Path;

use crate::model::{Coords, Image, SummaryMetadata};

use super::Result;

/// An append-then-freeze collection of images keyed by unique coordinates.
pub trait Datastore: Send + Sync {
    fn summary_metadata(&self) -> &SummaryMetadata;

    /// Backends may refuse once images were written.
    fn set_summary_metadata(&mut self, metadata: SummaryMetadata) -> Result<()>;

    /// Largest index seen on every axis.
    fn max_indices(&self) -> Coords;

    /// Coordinates of all stored images, in no particular order.
    fn unordered_image_coords(&self) -> Vec<Coords>;

    fn image(&self, coords: &Coords) -> Result<Image>;

    fn put_image(&mut self, image: Image) -> Result<()>;

    /// Irreversibly switches the store to read-only. Freezing twice is a no-op.
    fn freeze(&mut self) -> Result<()>;

    fn is_frozen(&self) -> bool;

    fn num_images(&self) -> usize;

    fn save_path(&self) -> Option<&Path> {
        None
    }

    fn axes(&self) -> Vec<String> {
        self.max_indices().axes().map(str::to_string).collect()
    }

    fn axis_length(&self, axis: &str) -> usize {
        self.max_indices().index(axis).map_or(0, |max| max + 1)
    }
}
