use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::store::{Datastore, FileDatastore, FileStoreOptions, RamDatastore, unique_save_directory};

use super::{
    AxisRangeTable, CancelToken, CoordsTranslator, DisplayManager, DuplicateError, ErrorSink,
    LogErrorSink, PixelCropper, ProgressReporter, Result, Roi, SelectionFilter, remap_summary,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DestinationKind {
    #[default]
    Memory,
    File {
        /// Parent directory; the copy lands in a fresh `<directory>/<name>`.
        directory: PathBuf,
        #[serde(default)]
        options: FileStoreOptions,
    },
}

#[derive(Debug, Clone)]
pub struct DuplicationConfig {
    pub name: String,
    pub ranges: AxisRangeTable,
    pub roi: Option<Roi>,
    pub destination: DestinationKind,
    pub show_while_copying: bool,
}

impl DuplicationConfig {
    pub fn new(name: impl Into<String>, ranges: AxisRangeTable) -> Self {
        Self {
            name: name.into(),
            ranges,
            roi: None,
            destination: DestinationKind::Memory,
            show_while_copying: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DuplicateError::Recipe(
                "duplicate name must not be empty".to_string(),
            ));
        }
        if let Some(roi) = &self.roi {
            roi.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicationState {
    Idle,
    Initializing,
    Copying,
    Finalizing,
    Done,
    Cancelled,
    Failed,
}

/// Result of one run. The destination is handed back in every terminal
/// state; after `Cancelled` or `Failed` it is partial and still open.
pub struct DuplicationOutcome {
    pub name: String,
    pub state: DuplicationState,
    pub copied: usize,
    pub total: Option<usize>,
    pub destination: Box<dyn Datastore>,
    pub failure: Option<DuplicateError>,
}

impl std::fmt::Debug for DuplicationOutcome {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DuplicationOutcome")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("copied", &self.copied)
            .field("total", &self.total)
            .field("destination_images", &self.destination.num_images())
            .field("failure", &self.failure)
            .finish()
    }
}

impl DuplicationOutcome {
    pub fn is_done(&self) -> bool {
        self.state == DuplicationState::Done
    }
}

enum LoopExit {
    Completed,
    Cancelled,
}

pub struct Duplicator {
    config: DuplicationConfig,
    state: DuplicationState,
    progress: Option<Box<dyn ProgressReporter>>,
    display: Option<Box<dyn DisplayManager>>,
    errors: Box<dyn ErrorSink>,
    cancel: CancelToken,
}

impl Duplicator {
    pub fn new(config: DuplicationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: DuplicationState::Idle,
            progress: None,
            display: None,
            errors: Box::new(LogErrorSink),
            cancel: CancelToken::new(),
        })
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_display(mut self, display: Box<dyn DisplayManager>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_error_sink(mut self, errors: Box<dyn ErrorSink>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn spawn(self, source: Arc<dyn Datastore>) -> Result<DuplicationHandle> {
        let cancel = self.cancel.clone();
        let mut duplicator = self;
        let join = thread::Builder::new()
            .name("duplicator".to_string())
            .spawn(move || duplicator.run(source.as_ref()))?;
        Ok(DuplicationHandle { cancel, join })
    }

    /// `Err` is returned only when the destination could not be prepared;
    /// copy failures end in an outcome with state `Failed`.
    pub fn run(&mut self, source: &dyn Datastore) -> Result<DuplicationOutcome> {
        self.transition(DuplicationState::Initializing);
        let (mut destination, name) = match self.prepare_destination(source) {
            Ok(prepared) => prepared,
            Err(error) => {
                self.transition(DuplicationState::Failed);
                self.errors.show_error(&error.user_message());
                return Err(error);
            }
        };
        if self.config.show_while_copying {
            if let Some(display) = self.display.as_mut() {
                display.attach_display(destination.as_ref(), &name);
            }
        }

        self.transition(DuplicationState::Copying);
        let total = self.config.ranges.total_count();
        if let Some(progress) = self.progress.as_mut() {
            progress.start(&format!("Duplicating to {name}"), total);
        }
        let mut copied = 0;
        let exit = self.copy_images(source, destination.as_mut(), &mut copied);
        if let Some(progress) = self.progress.as_mut() {
            progress.hide();
        }

        let failure = match exit {
            Ok(LoopExit::Completed) => self.finalize(destination.as_mut(), &name).err(),
            Ok(LoopExit::Cancelled) => {
                info!("duplication of `{name}` cancelled after {copied} images");
                self.transition(DuplicationState::Cancelled);
                None
            }
            Err(error) => Some(error),
        };
        if let Some(error) = &failure {
            warn!("duplication of `{name}` failed after {copied} images: {error}");
            self.errors.show_error(&error.user_message());
            self.transition(DuplicationState::Failed);
        }
        if self.state == DuplicationState::Done {
            info!("duplicated {copied} images into `{name}`");
        }

        Ok(DuplicationOutcome {
            name,
            state: self.state,
            copied,
            total,
            destination,
            failure,
        })
    }

    fn transition(&mut self, next: DuplicationState) {
        debug!("duplicator state {:?} -> {next:?}", self.state);
        self.state = next;
    }

    fn prepare_destination(
        &self,
        source: &dyn Datastore,
    ) -> Result<(Box<dyn Datastore>, String)> {
        let (mut destination, name): (Box<dyn Datastore>, String) = match &self.config.destination
        {
            DestinationKind::Memory => (Box::new(RamDatastore::new()), self.config.name.clone()),
            DestinationKind::File { directory, options } => {
                let root = unique_save_directory(directory.join(&self.config.name));
                let name = root
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.config.name.clone());
                (Box::new(FileDatastore::create(&root, *options)?), name)
            }
        };
        let summary = remap_summary(
            source.summary_metadata(),
            &source.max_indices(),
            &self.config.ranges,
        );
        destination.set_summary_metadata(summary)?;
        Ok((destination, name))
    }

    fn copy_images(
        &mut self,
        source: &dyn Datastore,
        destination: &mut dyn Datastore,
        copied: &mut usize,
    ) -> Result<LoopExit> {
        let ranges = &self.config.ranges;
        let filter = SelectionFilter::new(ranges);
        let translator = CoordsTranslator::new(ranges);
        let cropper = PixelCropper::new(self.config.roi.clone());

        for source_coords in source.unordered_image_coords() {
            if self.cancel_requested() {
                return Ok(LoopExit::Cancelled);
            }
            if !filter.accepts(&source_coords) {
                continue;
            }
            let coords = translator.translate(&source_coords)?;
            let image = source.image(&source_coords)?;
            let copy = cropper.crop(&image, coords)?;

            if self.cancel_requested() {
                return Ok(LoopExit::Cancelled);
            }
            destination.put_image(copy)?;
            *copied += 1;
            if let Some(progress) = self.progress.as_mut() {
                progress.advance(1);
            }
        }
        Ok(LoopExit::Completed)
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
            || self
                .progress
                .as_ref()
                .is_some_and(|progress| progress.is_cancel_requested())
    }

    fn finalize(&mut self, destination: &mut dyn Datastore, name: &str) -> Result<()> {
        self.transition(DuplicationState::Finalizing);
        destination.freeze()?;
        if let Some(display) = self.display.as_mut() {
            if !self.config.show_while_copying {
                display.attach_display(destination, name);
            }
            display.register_for_lifecycle_management(destination);
        }
        self.transition(DuplicationState::Done);
        Ok(())
    }
}

#[derive(Debug)]
pub struct DuplicationHandle {
    cancel: CancelToken,
    join: JoinHandle<Result<DuplicationOutcome>>,
}

impl DuplicationHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn join(self) -> Result<DuplicationOutcome> {
        self.join
            .join()
            .map_err(|_| DuplicateError::WorkerPanicked)?
    }
}
