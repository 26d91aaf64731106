mod collab;
mod crop;
mod error;
mod pipeline;
mod ranges;
mod recipe;
mod remap;
mod selection;


pub use collab::{
    CancelToken, DisplayManager, ErrorSink, LogDisplay, LogErrorSink, LogProgress,
    ProgressReporter,
};
pub use crop::{PixelCropper, Region, Roi};
pub use error::{DuplicateError, Result};
pub use pipeline::{
    DestinationKind, DuplicationConfig, DuplicationHandle, DuplicationOutcome, DuplicationState,
    Duplicator,
};
pub use ranges::{AxisRange, AxisRangeTable};
pub use recipe::{DuplicationRecipe, DuplicationReport, load_recipe, save_report};
pub use remap::{intended_dimensions, remap_channel_names, remap_summary};
pub use selection::{CoordsTranslator, SelectionFilter};
