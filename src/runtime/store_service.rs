use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::formats::read_images;
use crate::model::{Coords, PixelFormat, SummaryMetadata, canonical_axis};
use crate::store::{Datastore, FileDatastore, RamDatastore};

use super::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisInfo {
    pub axis: String,
    pub length: usize,
}

/// JSON-friendly description of a datastore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreInfo {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
    pub frozen: bool,
    pub num_images: usize,
    pub axes: Vec<AxisInfo>,
    pub channel_names: Vec<String>,
    pub intended_dimensions: Option<Coords>,
    pub pixel_formats: Vec<PixelFormat>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StoreService;

impl StoreService {
    /// Opens a store directory as is; single image files are decoded into a
    /// frozen in-memory store named after the file stem.
    pub fn open(&self, path: impl AsRef<Path>, stack_axis: &str) -> Result<Arc<dyn Datastore>> {
        let path = path.as_ref();
        if FileDatastore::is_store_directory(path) {
            info!("opening datastore directory {}", path.display());
            return Ok(Arc::new(FileDatastore::open(path)?));
        }
        let images = read_images(path, &canonical_axis(stack_axis))?;
        let summary = SummaryMetadata {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string()),
            ..SummaryMetadata::default()
        };
        let mut store = RamDatastore::from_images(summary, images)?;
        store.freeze()?;
        info!(
            "loaded {} images from {}",
            store.num_images(),
            path.display()
        );
        Ok(Arc::new(store))
    }

    pub fn describe(&self, store: &dyn Datastore) -> Result<StoreInfo> {
        let coords = store.unordered_image_coords();
        let planes = coords
            .par_iter()
            .map(|coords| -> Result<_> {
                let image = store.image(coords)?;
                Ok((image.pixel_format(), image.pixels().min_max()))
            })
            .collect::<Result<Vec<_>>>()?;

        let pixel_formats = planes
            .iter()
            .map(|(format, _)| *format)
            .fold(Vec::new(), |mut formats, format| {
                if !formats.contains(&format) {
                    formats.push(format);
                }
                formats
            });
        let (min, max) = planes
            .iter()
            .filter_map(|(_, range)| *range)
            .fold((None, None), |(min, max): (Option<f64>, Option<f64>), (lo, hi)| {
                (
                    Some(min.map_or(lo, |min| min.min(lo))),
                    Some(max.map_or(hi, |max| max.max(hi))),
                )
            });

        let summary = store.summary_metadata();
        Ok(StoreInfo {
            name: summary.name.clone(),
            path: store.save_path().map(Path::to_path_buf),
            frozen: store.is_frozen(),
            num_images: store.num_images(),
            axes: store
                .axes()
                .into_iter()
                .map(|axis| {
                    let length = store.axis_length(&axis);
                    AxisInfo { axis, length }
                })
                .collect(),
            channel_names: summary.channel_names.clone(),
            intended_dimensions: summary.intended_dimensions.clone(),
            pixel_formats,
            min,
            max,
        })
    }
}
