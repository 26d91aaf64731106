mod context;
mod duplicate_service;
mod error;
mod preferences;
mod store_service;

pub use context::AppContext;
pub use duplicate_service::DuplicateService;
pub use error::{AppError, Result};
pub use preferences::{
    JsonPreferences, MemoryPreferences, PREF_SAVE, PREF_SAVE_DIR, PREF_SHOW, Preferences,
};
pub use store_service::{AxisInfo, StoreInfo, StoreService};

#[cfg(test)]
mod tests;
