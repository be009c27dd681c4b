pub mod runner;
pub mod setup;

pub use runner::{run_all, run_file, Overrides, Runner};
pub use setup::{build, load_config, Simulation};
