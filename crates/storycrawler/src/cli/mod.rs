//! Command-line interface module.

mod commands;
mod stories;

pub use commands::{Cli, Commands};
pub use stories::list_stories;
