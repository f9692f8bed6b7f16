//! Config scaffolding command.

use crate::config::write_default_config;
use anyhow::{Result, bail};
use clap::Args;
use std::path::Path;

/// Write the default configuration.
#[derive(Args, Debug)]
pub struct Init {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl Init {
    /// Write the platform defaults to the config path.
    pub fn run(self, config: &Path) -> Result<()> {
        if config.exists() && !self.force {
            bail!("{} already exists (use --force to overwrite)", config.display());
        }
        write_default_config(config)?;
        println!("wrote {}", config.display());
        Ok(())
    }
}
