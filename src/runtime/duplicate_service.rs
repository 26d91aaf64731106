use std::path::Path;
use std::sync::Arc;

use crate::duplicate::{
    DuplicationConfig, DuplicationOutcome, DuplicationRecipe, DuplicationReport, Duplicator,
    LogDisplay, LogErrorSink, LogProgress, load_recipe, save_report,
};
use crate::store::Datastore;

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct DuplicateService;

impl DuplicateService {
    pub fn load_recipe(&self, path: impl AsRef<Path>) -> Result<DuplicationRecipe> {
        Ok(load_recipe(path)?)
    }

    pub fn plan(
        &self,
        source: &dyn Datastore,
        recipe: DuplicationRecipe,
        default_name: &str,
    ) -> Result<DuplicationConfig> {
        Ok(recipe.into_config(source, default_name)?)
    }

    /// Runs on the background worker with log-backed collaborators and waits
    /// for the outcome.
    pub fn run(
        &self,
        source: Arc<dyn Datastore>,
        config: DuplicationConfig,
    ) -> Result<DuplicationOutcome> {
        let handle = Duplicator::new(config)?
            .with_progress(Box::new(LogProgress::default()))
            .with_display(Box::new(LogDisplay))
            .with_error_sink(Box::new(LogErrorSink))
            .spawn(source)?;
        Ok(handle.join()?)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &DuplicationReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }
}
