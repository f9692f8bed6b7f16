//! CLI argument parsing and subcommand dispatch.

use crate::config::CONFIG_FILE;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod init;
pub mod serve;

/// Welfare platform server.
#[derive(Parser, Debug)]
#[command(name = "welfare-server", about = "Welfare platform server with role-based access gate")]
pub struct Cli {
    /// Subcommand to execute. Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server.
    Serve(serve::Serve),
    /// Print the gate decision for one request.
    CheckRoute(check::CheckRoute),
    /// Write a default configuration file.
    Init(init::Init),
}

impl Cli {
    /// Run the selected subcommand.
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => serve::Serve::default().run(&self.config).await,
            Some(Command::Serve(cmd)) => cmd.run(&self.config).await,
            Some(Command::CheckRoute(cmd)) => cmd.run(&self.config),
            Some(Command::Init(cmd)) => cmd.run(&self.config),
        }
    }
}
