pub mod config;
pub mod output;
pub mod script;

pub use config::{CliConfig, OutputFormat};
pub use output::{render, Dispatched};
pub use script::{demo_script, replay, Operation, ReplayError, Script};
