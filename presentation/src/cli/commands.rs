//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for cappello
#[derive(Parser, Debug)]
#[command(name = "cappello")]
#[command(author, version, about = "Sorting-hat quiz bot core with a local simulation REPL")]
#[command(long_about = r#"
Cappello runs the sorting-quiz core against a console platform adapter.

The REPL simulates the platform event stream: users join, press buttons,
and get sorted into a house by a softmax-with-noise draw over their
answers.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./cappello.toml       Project-level config
3. ~/.config/cappello/config.toml   Global config

Example:
  cappello
  cappello --seed 42 -vv
  cappello --config ./custom.toml
"#)]
pub struct Cli {
    /// Seed for deterministic runs (defaults to thread-local randomness)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
