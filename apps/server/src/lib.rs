//! Welfare server: the access gate in front of the platform's HTTP routes.

pub mod cmd;
pub mod config;
pub mod credentials;
pub mod middleware;
pub mod push;
pub mod render;
pub mod routes;
pub mod serve;
pub mod state;
pub mod utils;

pub use cmd::Cli;
pub use config::{GateConfig, ServerConfig};
pub use push::{MemorySubscriptions, SubscriptionStore};
pub use routes::router;
pub use serve::{PlatformState, ServeHandle, build_state, serve, serve_with_config};
pub use state::AppState;
