use std::collections::HashMap;

use crate::model::{Coords, Image, SummaryMetadata};

use super::{Datastore, Result, StoreError};

#[derive(Debug, Clone, Default)]
pub struct RamDatastore {
    summary: SummaryMetadata,
    images: HashMap<Coords, Image>,
    max_indices: Coords,
    frozen: bool,
}

impl RamDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an open store holding `images`.
    pub fn from_images(
        summary: SummaryMetadata,
        images: impl IntoIterator<Item = Image>,
    ) -> Result<Self> {
        let mut store = Self {
            summary,
            ..Self::default()
        };
        for image in images {
            store.put_image(image)?;
        }
        Ok(store)
    }
}

impl Datastore for RamDatastore {
    fn summary_metadata(&self) -> &SummaryMetadata {
        &self.summary
    }

    fn set_summary_metadata(&mut self, metadata: SummaryMetadata) -> Result<()> {
        if self.frozen {
            return Err(StoreError::Frozen);
        }
        self.summary = metadata;
        Ok(())
    }

    fn max_indices(&self) -> Coords {
        self.max_indices.clone()
    }

    fn unordered_image_coords(&self) -> Vec<Coords> {
        self.images.keys().cloned().collect()
    }

    fn image(&self, coords: &Coords) -> Result<Image> {
        self.images
            .get(coords)
            .cloned()
            .ok_or_else(|| StoreError::MissingImage(coords.clone()))
    }

    fn put_image(&mut self, image: Image) -> Result<()> {
        if self.frozen {
            return Err(StoreError::Frozen);
        }
        if self.images.contains_key(image.coords()) {
            return Err(StoreError::DuplicateCoordinate(image.coords().clone()));
        }
        self.max_indices = self.max_indices.max_with(image.coords());
        self.images.insert(image.coords().clone(), image);
        Ok(())
    }

    fn freeze(&mut self) -> Result<()> {
        self.frozen = true;
        Ok(())
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn num_images(&self) -> usize {
        self.images.len()
    }
}
