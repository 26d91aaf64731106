mod runner;
mod types;

pub use runner::run_cli;

#[cfg(test)]
mod tests;
