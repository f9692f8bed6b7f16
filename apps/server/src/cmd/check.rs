//! Offline route check against the configured table.

use crate::{
    config::{GateConfig, ServerConfig},
    render::unauthorized_location,
};
use anyhow::{Context, Result};
use clap::Args;
use gate::{Decision, Gate, Principal, Role};
use std::path::Path;

/// Print how the gate would answer a request.
#[derive(Args, Debug)]
pub struct CheckRoute {
    /// Request path, e.g. `/admin/settings`.
    pub path: String,
    /// HTTP method.
    #[arg(long, default_value = "GET")]
    pub method: String,
    /// Treat the request as signed in with this role.
    #[arg(long)]
    pub role: Option<String>,
    /// Treat the request as signed in without a role.
    #[arg(long, conflicts_with = "role")]
    pub signed_in: bool,
}

impl CheckRoute {
    /// Evaluate and print the decision. Uses platform defaults when the
    /// config file is absent.
    pub fn run(self, config: &Path) -> Result<()> {
        let gate_config = if config.exists() {
            ServerConfig::load(config)?.gate
        } else {
            GateConfig::default()
        };
        println!("{}", self.evaluate(&gate_config)?);
        Ok(())
    }

    /// The printable verdict.
    pub fn evaluate(&self, config: &GateConfig) -> Result<String> {
        let principal = match &self.role {
            Some(role) => {
                let role = role.parse::<Role>().context("invalid --role")?;
                Principal::user("cli", Some(role))
            }
            None if self.signed_in => Principal::user("cli", None),
            None => Principal::anonymous(),
        };
        let gate = Gate::new(config.route_table()?);

        Ok(match gate.decide(&self.path, &self.method, &principal) {
            Decision::Allow { route: Some(name) } => format!("allow ({name})"),
            Decision::Allow { route: None } => "allow".to_owned(),
            Decision::DenyUnauthenticated => {
                format!("deny: unauthenticated -> {}", config.sign_in_path)
            }
            Decision::DenyForbidden(forbidden) => format!(
                "deny: forbidden -> {}",
                unauthorized_location(config, &forbidden)
            ),
        })
    }
}
