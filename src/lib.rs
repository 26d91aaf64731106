pub mod cli;
pub mod duplicate;
pub mod formats;
pub mod model;
pub mod runtime;
pub mod store;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
