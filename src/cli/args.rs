use std::path::PathBuf;

use clap::Parser;

use crate::{Commands, Config, Result};

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "blogger",
    version,
    about = "Write, search and manage a local blog"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding the post store
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Keep posts in memory only; nothing is written to disk
    #[clap(long)]
    pub memory: bool,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Loads the configuration file and applies command-line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match self.config.clone().or_else(Config::default_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if self.memory {
            config.in_memory = true;
        }

        Ok(config)
    }
}
