use crate::model::{CHANNEL, Coords, SIZE_AXES, SummaryMetadata};

use super::AxisRangeTable;

/// Channel names for the selected channel range. Missing source names are
/// synthesized as `channel <index>`.
pub fn remap_channel_names(source_names: &[String], ranges: &AxisRangeTable) -> Vec<String> {
    match ranges.range(CHANNEL) {
        Some(range) => (range.min..=range.max)
            .map(|index| {
                source_names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("channel {index}"))
            })
            .collect(),
        None => source_names.to_vec(),
    }
}

/// Intended dimensions of the copy, seeded from the source's maximum indices.
///
/// Position, time and z sizes become `max - min` of their selection,
/// matching the sizes existing stores were written with.
pub fn intended_dimensions(
    source_max_indices: &Coords,
    channel_count: usize,
    ranges: &AxisRangeTable,
) -> Coords {
    let mut builder = source_max_indices.copy().channel(channel_count);
    for axis in SIZE_AXES {
        if let Some(range) = ranges.range(axis) {
            builder = builder.index(axis, range.max - range.min);
        }
    }
    builder.build()
}

pub fn remap_summary(
    source: &SummaryMetadata,
    source_max_indices: &Coords,
    ranges: &AxisRangeTable,
) -> SummaryMetadata {
    let channel_names = remap_channel_names(&source.channel_names, ranges);
    let intended = intended_dimensions(source_max_indices, channel_names.len(), ranges);
    SummaryMetadata {
        channel_names,
        intended_dimensions: Some(intended),
        ..source.clone()
    }
}
