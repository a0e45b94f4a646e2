mod args;
mod commands;
pub mod types;

pub use args::Cli;
pub use commands::run;
