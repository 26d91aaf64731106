use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CHANNEL, STAGE_POSITION, TIME, Z};

/// Immutable; edit through [`Coords::copy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coords {
    indices: BTreeMap<String, usize>,
}

impl Coords {
    pub fn builder() -> CoordsBuilder {
        CoordsBuilder::default()
    }

    pub fn copy(&self) -> CoordsBuilder {
        CoordsBuilder {
            indices: self.indices.clone(),
        }
    }

    pub fn index(&self, axis: &str) -> Option<usize> {
        self.indices.get(axis).copied()
    }

    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.indices.iter().map(|(axis, index)| (axis.as_str(), *index))
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Axes defined by only one side are taken from that side.
    pub fn max_with(&self, other: &Coords) -> Coords {
        let mut builder = self.copy();
        for (axis, index) in other.iter() {
            let current = self.index(axis).unwrap_or(0);
            builder = builder.index(axis, current.max(index));
        }
        builder.build()
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .indices
            .iter()
            .map(|(axis, index)| format!("{axis}={index}"))
            .collect::<Vec<_>>();
        write!(formatter, "<{}>", parts.join(", "))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for Coords {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            indices: iter
                .into_iter()
                .map(|(axis, index)| (axis.into(), index))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoordsBuilder {
    indices: BTreeMap<String, usize>,
}

impl CoordsBuilder {
    pub fn index(mut self, axis: impl Into<String>, index: usize) -> Self {
        self.indices.insert(axis.into(), index);
        self
    }

    pub fn channel(self, index: usize) -> Self {
        self.index(CHANNEL, index)
    }

    pub fn time(self, index: usize) -> Self {
        self.index(TIME, index)
    }

    pub fn z(self, index: usize) -> Self {
        self.index(Z, index)
    }

    pub fn stage_position(self, index: usize) -> Self {
        self.index(STAGE_POSITION, index)
    }

    pub fn build(self) -> Coords {
        Coords {
            indices: self.indices,
        }
    }
}
