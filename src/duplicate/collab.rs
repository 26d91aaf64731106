use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info};

use crate::store::Datastore;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

pub trait ProgressReporter: Send {
    fn start(&mut self, label: &str, total: Option<usize>);
    fn advance(&mut self, count: usize);
    fn is_cancel_requested(&self) -> bool {
        false
    }
    fn hide(&mut self);
}

pub trait DisplayManager: Send {
    fn attach_display(&mut self, store: &dyn Datastore, title: &str);
    fn register_for_lifecycle_management(&mut self, store: &dyn Datastore);
}

pub trait ErrorSink: Send {
    fn show_error(&self, message: &str);
}

/// Logs progress every `every` images.
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
    total: Option<usize>,
    done: usize,
    every: usize,
}

impl LogProgress {
    pub fn new(every: usize) -> Self {
        Self {
            label: String::new(),
            total: None,
            done: 0,
            every: every.max(1),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(25)
    }
}

impl ProgressReporter for LogProgress {
    fn start(&mut self, label: &str, total: Option<usize>) {
        self.label = label.to_string();
        self.total = total;
        self.done = 0;
        match total {
            Some(total) => info!("{label}: 0/{total}"),
            None => info!("{label}"),
        }
    }

    fn advance(&mut self, count: usize) {
        let before = self.done / self.every;
        self.done += count;
        if self.done / self.every != before || Some(self.done) == self.total {
            match self.total {
                Some(total) => info!("{}: {}/{total}", self.label, self.done),
                None => info!("{}: {}", self.label, self.done),
            }
        }
    }

    fn hide(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogDisplay;

impl DisplayManager for LogDisplay {
    fn attach_display(&mut self, store: &dyn Datastore, title: &str) {
        info!(
            "display `{title}` attached ({} images so far)",
            store.num_images()
        );
    }

    fn register_for_lifecycle_management(&mut self, store: &dyn Datastore) {
        match store.save_path() {
            Some(path) => info!("managing datastore at {}", path.display()),
            None => info!("managing in-memory datastore"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn show_error(&self, message: &str) {
        error!("{message}");
    }
}
