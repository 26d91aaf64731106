use crate::model::{CoreError, Coords};

use super::AxisRangeTable;

#[derive(Debug, Clone, Copy)]
pub struct SelectionFilter<'a> {
    ranges: &'a AxisRangeTable,
}

impl<'a> SelectionFilter<'a> {
    pub fn new(ranges: &'a AxisRangeTable) -> Self {
        Self { ranges }
    }

    /// True when every restricted axis of `coords` lies inside its range.
    pub fn accepts(&self, coords: &Coords) -> bool {
        coords.iter().all(|(axis, index)| {
            self.ranges
                .range(axis)
                .is_none_or(|range| range.contains(index))
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoordsTranslator<'a> {
    ranges: &'a AxisRangeTable,
}

impl<'a> CoordsTranslator<'a> {
    pub fn new(ranges: &'a AxisRangeTable) -> Self {
        Self { ranges }
    }

    /// Shifts every restricted axis so its range starts at zero.
    pub fn translate(&self, coords: &Coords) -> crate::model::Result<Coords> {
        let mut builder = coords.copy();
        for (axis, index) in coords.iter() {
            if let Some(range) = self.ranges.range(axis) {
                let shifted =
                    index
                        .checked_sub(range.min)
                        .ok_or_else(|| CoreError::InvalidCoordinate {
                            axis: axis.to_string(),
                            index,
                            min: range.min,
                        })?;
                builder = builder.index(axis, shifted);
            }
        }
        Ok(builder.build())
    }
}
