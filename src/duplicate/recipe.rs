use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{Coords, canonical_axis};
use crate::store::Datastore;

use super::{
    AxisRange, AxisRangeTable, DestinationKind, DuplicateError, DuplicationConfig,
    DuplicationOutcome, DuplicationState, Result, Roi,
};

/// File form of a [`DuplicationConfig`]. Ranges are 0-based and inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicationRecipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ranges: BTreeMap<String, AxisRange>,
    #[serde(default)]
    pub roi: Option<Roi>,
    #[serde(default)]
    pub destination: DestinationKind,
    /// Unset defers to the caller's remembered choice.
    #[serde(default)]
    pub show_while_copying: Option<bool>,
}

impl DuplicationRecipe {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DuplicateError::Recipe(
                    "recipe name must not be empty when given".to_string(),
                ));
            }
        }
        for (axis, range) in &self.ranges {
            if range.min > range.max {
                return Err(DuplicateError::Recipe(format!(
                    "range for axis `{axis}` has min {} above max {}",
                    range.min, range.max
                )));
            }
        }
        if let Some(roi) = &self.roi {
            roi.validate()?;
        }
        Ok(())
    }

    /// Resolves the recipe against `source`, validating every range.
    pub fn into_config(
        self,
        source: &dyn Datastore,
        default_name: &str,
    ) -> Result<DuplicationConfig> {
        self.validate()?;
        let mut ranges = AxisRangeTable::from_store(source);
        for (axis, range) in &self.ranges {
            ranges.set(&canonical_axis(axis), range.min, range.max)?;
        }
        let config = DuplicationConfig {
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            ranges,
            roi: self.roi,
            destination: self.destination,
            show_while_copying: self.show_while_copying.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

pub fn load_recipe(path: impl AsRef<Path>) -> Result<DuplicationRecipe> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let recipe = if is_yaml(path) {
        serde_yaml::from_str::<DuplicationRecipe>(&raw)?
    } else {
        serde_json::from_str::<DuplicationRecipe>(&raw)?
    };
    recipe.validate()?;
    Ok(recipe)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicationReport {
    pub name: String,
    pub state: DuplicationState,
    pub copied: usize,
    pub total: Option<usize>,
    pub destination: Option<PathBuf>,
    pub frozen: bool,
    pub channel_names: Vec<String>,
    pub intended_dimensions: Option<Coords>,
    pub error: Option<String>,
}

impl DuplicationOutcome {
    pub fn report(&self) -> DuplicationReport {
        let summary = self.destination.summary_metadata();
        DuplicationReport {
            name: self.name.clone(),
            state: self.state,
            copied: self.copied,
            total: self.total,
            destination: self.destination.save_path().map(Path::to_path_buf),
            frozen: self.destination.is_frozen(),
            channel_names: summary.channel_names.clone(),
            intended_dimensions: summary.intended_dimensions.clone(),
            error: self.failure.as_ref().map(DuplicateError::user_message),
        }
    }
}

pub fn save_report(path: impl AsRef<Path>, report: &DuplicationReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized)?;
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}
