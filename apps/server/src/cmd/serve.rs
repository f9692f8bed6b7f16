//! Server command.

use anyhow::Result;
use clap::Args;
use std::path::Path;

/// Start the HTTP server.
#[derive(Args, Debug, Default)]
pub struct Serve {
    /// Bind address (host:port). Defaults to the `[server]` section.
    #[arg(long)]
    pub bind: Option<String>,
}

impl Serve {
    /// Load config and serve until ctrl-c.
    pub async fn run(self, config: &Path) -> Result<()> {
        let handle = crate::serve(config, self.bind.as_deref()).await?;

        tokio::signal::ctrl_c().await?;
        tracing::info!("received ctrl-c, shutting down");
        handle.shutdown().await?;
        tracing::info!("server shut down");
        Ok(())
    }
}
