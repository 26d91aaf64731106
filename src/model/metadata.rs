use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Coords;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub channel_names: Vec<String>,
    /// Per-axis sizes the acquisition was meant to reach.
    #[serde(default)]
    pub intended_dimensions: Option<Coords>,
    #[serde(default)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl SummaryMetadata {
    pub fn with_channel_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel_names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
