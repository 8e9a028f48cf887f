//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storycrawler - enumerate the stories of a running Storybook
#[derive(Parser, Debug)]
#[command(name = "storycrawler")]
#[command(about = "Enumerate the stories of a running Storybook through a real browser", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every story registered in the Storybook
    Stories(StoriesArgs),
}

/// Arguments of the `stories` command
#[derive(Args, Debug)]
pub struct StoriesArgs {
    /// Storybook base URL (overrides `[connection] url`)
    #[arg(long)]
    pub url: Option<String>,

    /// DevTools HTTP endpoint of the browser (overrides `[browser] endpoint`)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Configuration file layered over the bundled defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Give up if the Storybook registry is not defined after this many milliseconds
    #[arg(long)]
    pub registry_timeout_ms: Option<u64>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One story per line
    Human,
    /// JSON array of story records
    Json,
}
