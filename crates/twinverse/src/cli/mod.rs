//! Command-line interface for the twinverse binary.

mod commands;
mod handlers;
mod stores;

pub use commands::{Cli, Commands};
pub use handlers::run;
