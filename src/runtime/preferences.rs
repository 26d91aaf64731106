use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use super::{AppError, Result};

/// Whether the last duplicate was saved to disk.
pub const PREF_SAVE: &str = "duplicator.save";
/// Whether the last duplicate was displayed while copying.
pub const PREF_SHOW: &str = "duplicator.show";
pub const PREF_SAVE_DIR: &str = "duplicator.save_dir";

/// Remembered user choices, keyed by dotted names.
pub trait Preferences: Send {
    fn value(&self, key: &str) -> Option<&Value>;

    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;

    fn entries(&self) -> &BTreeMap<String, Value>;

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.set_value(key, Value::Bool(value))
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.value(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, Value::String(value.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn entries(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}

/// Preferences persisted as a flat JSON object, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: PathBuf,
    values: MemoryPreferences,
}

impl JsonPreferences {
    /// A missing file starts out empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.is_file() {
            let raw = fs::read_to_string(&path).map_err(|source| AppError::PreferencesIo {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<BTreeMap<String, Value>>(&raw).map_err(|source| {
                AppError::PreferencesFormat {
                    path: path.clone(),
                    source,
                }
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            values: MemoryPreferences { values },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<()> {
        let io_error = |source| AppError::PreferencesIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let serialized = serde_json::to_string_pretty(self.values.entries()).map_err(|source| {
            AppError::PreferencesFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, serialized).map_err(io_error)?;
        debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}

impl Preferences for JsonPreferences {
    fn value(&self, key: &str) -> Option<&Value> {
        self.values.value(key)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        if self.values.value(key) == Some(&value) {
            return Ok(());
        }
        self.values.set_value(key, value)?;
        self.write()
    }

    fn entries(&self) -> &BTreeMap<String, Value> {
        self.values.entries()
    }
}
