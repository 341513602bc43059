pub mod args;
pub mod commands;

pub use args::{Cli, Commands, RunArgs};
pub use commands::{init_logging, run};
