use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use tiff::decoder::Decoder;

use crate::formats::{IoError, PageWriter, read_page, write_single_page};
use crate::model::{Coords, Image, ImageMetadata, PixelFormat, SummaryMetadata};

use super::{Datastore, Result, StoreError};

const SUMMARY_FILE: &str = "summary.json";
const INDEX_FILE: &str = "index.json";
const STACK_FILE: &str = "images.tif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreOptions {
    /// Write every image as a page of one TIFF stack instead of one file each.
    pub multi_page: bool,
    /// Keep the on-disk index current after every write so an interrupted
    /// store can still be opened.
    pub appendable: bool,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        Self {
            multi_page: true,
            appendable: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    coords: Coords,
    file: String,
    page: usize,
    width: usize,
    height: usize,
    format: PixelFormat,
    #[serde(default)]
    metadata: ImageMetadata,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreIndex {
    frozen: bool,
    images: Vec<IndexEntry>,
}

/// A directory of TIFF pages plus JSON summary metadata and index.
#[derive(Debug)]
pub struct FileDatastore {
    root: PathBuf,
    options: FileStoreOptions,
    summary: SummaryMetadata,
    entries: Vec<IndexEntry>,
    lookup: HashMap<Coords, usize>,
    max_indices: Coords,
    writer: Option<PageWriter>,
    frozen: bool,
}

impl FileDatastore {
    pub fn create(root: impl AsRef<Path>, options: FileStoreOptions) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let store = Self {
            root,
            options,
            summary: SummaryMetadata::default(),
            entries: Vec::new(),
            lookup: HashMap::new(),
            max_indices: Coords::default(),
            writer: None,
            frozen: false,
        };
        store.write_summary()?;
        debug!("created file datastore at {}", store.root.display());
        Ok(store)
    }

    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let summary_path = root.join(SUMMARY_FILE);
        if !summary_path.is_file() {
            return Err(StoreError::NotAStore(root));
        }
        let summary: SummaryMetadata = serde_json::from_str(&fs::read_to_string(summary_path)?)?;
        let index_path = root.join(INDEX_FILE);
        let index: StoreIndex = if index_path.is_file() {
            serde_json::from_str(&fs::read_to_string(index_path)?)?
        } else {
            StoreIndex::default()
        };
        let mut store = Self {
            root,
            options: FileStoreOptions::default(),
            summary,
            entries: Vec::with_capacity(index.images.len()),
            lookup: HashMap::new(),
            max_indices: Coords::default(),
            writer: None,
            frozen: true,
        };
        for entry in index.images {
            store.insert_entry(entry);
        }
        Ok(store)
    }

    pub fn is_store_directory(path: impl AsRef<Path>) -> bool {
        path.as_ref().join(SUMMARY_FILE).is_file()
    }

    fn insert_entry(&mut self, entry: IndexEntry) {
        self.max_indices = self.max_indices.max_with(&entry.coords);
        self.lookup.insert(entry.coords.clone(), self.entries.len());
        self.entries.push(entry);
    }

    fn write_summary(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.summary)?;
        fs::write(self.root.join(SUMMARY_FILE), serialized)?;
        Ok(())
    }

    fn write_index(&self) -> Result<()> {
        let index = StoreIndex {
            frozen: self.frozen,
            images: self.entries.clone(),
        };
        fs::write(
            self.root.join(INDEX_FILE),
            serde_json::to_string_pretty(&index)?,
        )?;
        Ok(())
    }

    fn write_pixels(&mut self, image: &Image) -> Result<(String, usize)> {
        if self.options.multi_page {
            let writer = match self.writer.take() {
                Some(writer) => writer,
                None => PageWriter::create(&self.root.join(STACK_FILE))?,
            };
            let page = self.writer.insert(writer).append(image)?;
            Ok((STACK_FILE.to_string(), page))
        } else {
            let file = format!("img_{:06}.tif", self.entries.len());
            write_single_page(&self.root.join(&file), image)?;
            Ok((file, 0))
        }
    }
}

impl Datastore for FileDatastore {
    fn summary_metadata(&self) -> &SummaryMetadata {
        &self.summary
    }

    fn set_summary_metadata(&mut self, metadata: SummaryMetadata) -> Result<()> {
        if self.frozen {
            return Err(StoreError::Frozen);
        }
        if !self.entries.is_empty() {
            return Err(StoreError::MetadataFrozen);
        }
        self.summary = metadata;
        self.write_summary()
    }

    fn max_indices(&self) -> Coords {
        self.max_indices.clone()
    }

    fn unordered_image_coords(&self) -> Vec<Coords> {
        self.lookup.keys().cloned().collect()
    }

    fn image(&self, coords: &Coords) -> Result<Image> {
        let entry = self
            .lookup
            .get(coords)
            .map(|position| &self.entries[*position])
            .ok_or_else(|| StoreError::MissingImage(coords.clone()))?;
        let file = File::open(self.root.join(&entry.file))?;
        let mut decoder = Decoder::new(file).map_err(IoError::from)?;
        for _ in 0..entry.page {
            decoder.next_image().map_err(IoError::from)?;
        }
        let (width, height, pixels) = read_page(&mut decoder, entry.page)?;
        Ok(Image::new(
            entry.coords.clone(),
            width,
            height,
            pixels,
            entry.metadata.clone(),
        )?)
    }

    fn put_image(&mut self, image: Image) -> Result<()> {
        if self.frozen {
            return Err(StoreError::Frozen);
        }
        if self.lookup.contains_key(image.coords()) {
            return Err(StoreError::DuplicateCoordinate(image.coords().clone()));
        }
        let (file, page) = self.write_pixels(&image)?;
        self.insert_entry(IndexEntry {
            coords: image.coords().clone(),
            file,
            page,
            width: image.width(),
            height: image.height(),
            format: image.pixel_format(),
            metadata: image.metadata().clone(),
        });
        if self.options.appendable {
            self.write_index()?;
        }
        Ok(())
    }

    fn freeze(&mut self) -> Result<()> {
        if self.frozen {
            return Ok(());
        }
        self.writer = None;
        self.frozen = true;
        self.write_summary()?;
        self.write_index()?;
        debug!(
            "froze file datastore at {} with {} images",
            self.root.display(),
            self.entries.len()
        );
        Ok(())
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn num_images(&self) -> usize {
        self.entries.len()
    }

    fn save_path(&self) -> Option<&Path> {
        Some(&self.root)
    }
}
