mod api;
mod error;
mod file;
mod memory;
mod util;

#[cfg(test)]
mod tests;

pub use api::Datastore;
pub use error::{Result, StoreError};
pub use file::{FileDatastore, FileStoreOptions};
pub use memory::RamDatastore;
pub use util::unique_save_directory;
