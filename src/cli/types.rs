use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "image-dup",
    version,
    about = "Copies sub-ranges of multi-dimensional image series into new datastores"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Describes a datastore directory, TIFF stack or PNG/JPEG image.
    Info {
        input: PathBuf,
        /// Axis that TIFF pages are laid out along.
        #[arg(long, default_value = "time")]
        stack_axis: String,
    },
    Duplicate(DuplicateArgs),
    /// Prints stored preferences.
    Prefs { file: PathBuf },
}

#[derive(Debug, Args)]
pub(super) struct DuplicateArgs {
    pub(super) input: PathBuf,
    /// YAML or JSON recipe; ranges there are 0-based.
    #[arg(long)]
    pub(super) recipe: Option<PathBuf>,
    /// Inclusive 1-based range, e.g. `time=2:4`. Repeatable.
    #[arg(long = "range", value_name = "AXIS=MIN:MAX")]
    pub(super) ranges: Vec<String>,
    #[arg(long, value_name = "X,Y,W,H", conflicts_with = "polygon")]
    pub(super) rect: Option<String>,
    #[arg(long, value_name = "X,Y;X,Y;...")]
    pub(super) polygon: Option<String>,
    #[arg(long)]
    pub(super) name: Option<String>,
    /// Parent directory for a file-backed copy.
    #[arg(long, value_name = "DIR", conflicts_with = "in_memory")]
    pub(super) save: Option<PathBuf>,
    /// Keep the copy in memory even if saving is remembered.
    #[arg(long)]
    pub(super) in_memory: bool,
    /// Store all pages in one TIFF stack (default) or one file per image.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(super) multi_page: Option<bool>,
    #[arg(long)]
    pub(super) appendable: bool,
    /// Attach the display before copying starts.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(super) show: Option<bool>,
    #[arg(long, default_value = "time")]
    pub(super) stack_axis: String,
    #[arg(long)]
    pub(super) report: Option<PathBuf>,
    #[arg(long)]
    pub(super) prefs: Option<PathBuf>,
}
