//! Server configuration loaded from TOML.

use anyhow::{Context, Result};
use compact_str::CompactString;
use gate::{
    Role, RouteRule, RouteTable,
    pattern::parse_all,
    rule::{PLATFORM_PUBLIC_ROUTES, platform_rules},
};
use identity::{UserRecord, session::DEFAULT_SESSION_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Default configuration filename.
pub const CONFIG_FILE: &str = "welfare.toml";

/// Top-level server configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind configuration.
    #[serde(default)]
    pub server: BindConfig,
    /// Access gate configuration.
    #[serde(default)]
    pub gate: GateConfig,
    /// Users seeded into the in-memory directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserRecord>,
    /// Sessions seeded into the in-memory store.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sessions: Vec<SessionSeed>,
}

/// Listener configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Access gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Where unauthenticated page requests are sent.
    pub sign_in_path: String,
    /// Where forbidden requests are sent.
    pub unauthorized_path: String,
    /// Paths under this prefix get JSON errors instead of redirects.
    pub api_prefix: String,
    /// Cookie carrying the session token.
    pub session_cookie: String,
    /// Cookie remembering the page to return to after sign-in.
    pub redirect_cookie: String,
    /// Upper bound on one identity lookup, in milliseconds.
    pub identity_timeout_ms: u64,
    /// Origins allowed to have created a session. Empty accepts any.
    pub authorized_parties: Vec<String>,
    /// Public path patterns.
    pub public_routes: Vec<String>,
    /// Protected rules, evaluated in order.
    pub protected: Vec<RuleConfig>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/sign-in".to_owned(),
            unauthorized_path: "/unauthorized".to_owned(),
            api_prefix: "/api/".to_owned(),
            session_cookie: "__session".to_owned(),
            redirect_cookie: "redirectTo".to_owned(),
            identity_timeout_ms: 5_000,
            authorized_parties: [
                "http://localhost:3000",
                "https://localhost:3000",
                "https://khadimemillat.org",
                "https://www.khadimemillat.org",
            ]
            .map(str::to_owned)
            .to_vec(),
            public_routes: PLATFORM_PUBLIC_ROUTES.iter().map(|s| s.to_string()).collect(),
            protected: platform_rules()
                .into_iter()
                .map(|(name, patterns, roles)| RuleConfig {
                    name: name.into(),
                    patterns: patterns.iter().map(|s| s.to_string()).collect(),
                    allowed_roles: roles.to_vec(),
                })
                .collect(),
        }
    }
}

impl GateConfig {
    /// Compile the configured patterns into a route table.
    pub fn route_table(&self) -> Result<RouteTable> {
        let public = parse_all(self.public_routes.as_slice()).context("invalid public route")?;
        let protected = self
            .protected
            .iter()
            .map(|rule| {
                RouteRule::new(&rule.name, rule.patterns.as_slice(), &rule.allowed_roles)
                    .with_context(|| format!("invalid pattern in rule '{}'", rule.name))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RouteTable::new(public, protected))
    }

    /// Whether a session created by `party` will be honoured.
    pub fn accepts_party(&self, party: Option<&str>) -> bool {
        self.authorized_parties.is_empty()
            || party.is_some_and(|p| self.authorized_parties.iter().any(|a| a == p))
    }

    /// Identity lookup timeout.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }
}

/// One protected rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule label shown in denial messages.
    pub name: CompactString,
    /// Path patterns selecting the rule.
    pub patterns: Vec<String>,
    /// Admitted roles, in reporting order.
    pub allowed_roles: Vec<Role>,
}

/// A session to register at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSeed {
    /// Session token (supports `${ENV_VAR}` expansion).
    pub token: String,
    /// Owning user id.
    pub user_id: String,
    /// Origin recorded as the session's creator. Must be one of
    /// `gate.authorized_parties` unless that list is empty, otherwise the
    /// session always resolves as anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_party: Option<String>,
    /// Lifetime in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

fn default_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl ServerConfig {
    /// Parse a TOML string, expanding environment variables first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        config.gate.route_table()?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Write the default configuration to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(&ServerConfig::default())
        .context("failed to serialize default config")?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
