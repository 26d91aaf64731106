use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::Datastore;

use super::{DuplicateError, Result};

/// Inclusive, 0-based index selection along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: usize,
    pub max: usize,
}

impl AxisRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> usize {
        self.max - self.min + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.min..=self.max).contains(&index)
    }
}

/// Per-axis selections for one duplication run.
///
/// Only axes longer than one index take part; everything else passes
/// through a run untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisRangeTable {
    lengths: BTreeMap<String, usize>,
    ranges: BTreeMap<String, AxisRange>,
}

impl AxisRangeTable {
    /// Full-range selection over every adjustable axis of `store`.
    pub fn from_store(store: &dyn Datastore) -> Self {
        Self::from_lengths(
            store
                .axes()
                .into_iter()
                .map(|axis| {
                    let length = store.axis_length(&axis);
                    (axis, length)
                }),
        )
    }

    pub fn from_lengths<S: Into<String>>(lengths: impl IntoIterator<Item = (S, usize)>) -> Self {
        let lengths = lengths
            .into_iter()
            .map(|(axis, length)| (axis.into(), length))
            .collect::<BTreeMap<String, usize>>();
        let ranges = lengths
            .iter()
            .filter(|(_, length)| **length > 1)
            .map(|(axis, length)| (axis.clone(), AxisRange::new(0, length - 1)))
            .collect();
        Self { lengths, ranges }
    }

    pub fn set(&mut self, axis: &str, min: usize, max: usize) -> Result<()> {
        let length = self.axis_length(axis);
        if length <= 1 {
            if (min, max) == (0, 0) {
                return Ok(());
            }
            return Err(DuplicateError::AxisNotAdjustable(axis.to_string()));
        }
        if min > max || max >= length {
            return Err(DuplicateError::InvalidRange {
                axis: axis.to_string(),
                min,
                max,
                length,
            });
        }
        self.ranges.insert(axis.to_string(), AxisRange::new(min, max));
        Ok(())
    }

    pub fn get(&self, axis: &str) -> Option<(usize, usize)> {
        self.range(axis).map(|range| (range.min, range.max))
    }

    pub fn range(&self, axis: &str) -> Option<AxisRange> {
        self.ranges.get(axis).copied()
    }

    /// Drops the selection for `axis` so it passes through unrestricted.
    pub fn clear(&mut self, axis: &str) -> Option<AxisRange> {
        self.ranges.remove(axis)
    }

    pub fn axis_length(&self, axis: &str) -> usize {
        self.lengths.get(axis).copied().unwrap_or(0)
    }

    pub fn range_size(&self, axis: &str) -> usize {
        self.range(axis)
            .map_or_else(|| self.axis_length(axis), |range| range.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AxisRange)> {
        self.ranges
            .iter()
            .map(|(axis, range)| (axis.as_str(), *range))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Number of images a run is expected to copy, when any axis takes part.
    pub fn total_count(&self) -> Option<usize> {
        if self.ranges.is_empty() {
            return None;
        }
        Some(self.ranges.values().map(AxisRange::size).product())
    }
}
