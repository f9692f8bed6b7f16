//! Server entrypoint shared by the binary and tests.

use crate::{config::ServerConfig, push::MemorySubscriptions, routes, state::AppState};
use anyhow::Result;
use gate::Gate;
use identity::{MemoryBackend, SessionResolver, SessionStore, UserDirectory};
use std::{path::Path, sync::Arc, time::Duration};
use tokio::sync::oneshot;

/// State wired with the in-process identity and subscription stores.
pub type PlatformState = AppState<SessionResolver<MemoryBackend>, MemorySubscriptions>;

/// How often expired sessions are purged.
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Build application state from configuration, seeding users and sessions.
pub fn build_state(config: &ServerConfig) -> Result<PlatformState> {
    let gate = Gate::new(config.gate.route_table()?);
    tracing::info!(
        public = gate.table().public().len(),
        protected = gate.table().protected().len(),
        "route table loaded"
    );

    let users = Arc::new(UserDirectory::new());
    for user in &config.users {
        users.upsert(user.clone());
    }
    let sessions = Arc::new(SessionStore::new());
    for seed in &config.sessions {
        if !config.gate.accepts_party(seed.authorized_party.as_deref()) {
            tracing::warn!(
                user = %seed.user_id,
                party = seed.authorized_party.as_deref().unwrap_or("<none>"),
                "seeded session's party is not authorized; it will resolve as anonymous"
            );
        }
        sessions.insert_with_token(
            &seed.token,
            &seed.user_id,
            seed.authorized_party.as_deref(),
            seed.ttl_secs,
        );
    }
    tracing::info!(users = users.len(), sessions = sessions.len(), "identity seeded");

    let backend = MemoryBackend::new(Arc::clone(&users), sessions);
    let resolver = SessionResolver::new(Arc::new(backend))
        .with_timeout(config.gate.identity_timeout())
        .with_authorized_parties(&config.gate.authorized_parties);

    Ok(AppState {
        gate: Arc::new(gate),
        gate_config: Arc::new(config.gate.clone()),
        resolver: Arc::new(resolver),
        users,
        subscriptions: Arc::new(MemorySubscriptions::new()),
    })
}

/// Handle returned by [`serve_with_config`]. Holds the bound port and the
/// shutdown trigger.
pub struct ServeHandle {
    /// The port the server is listening on.
    pub port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
    sweeper: tokio::task::JoinHandle<()>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        self.sweeper.abort();
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Load config from `path` and start serving on `bind`.
pub async fn serve(path: &Path, bind: Option<&str>) -> Result<ServeHandle> {
    let config = ServerConfig::load(path)?;
    tracing::info!("loaded configuration from {}", path.display());
    let bind = bind
        .map(str::to_owned)
        .unwrap_or_else(|| config.bind_address());
    serve_with_config(&config, &bind).await
}

/// Serve with an already-loaded config.
pub async fn serve_with_config(config: &ServerConfig, bind: &str) -> Result<ServeHandle> {
    let state = build_state(config)?;
    let sessions = Arc::clone(&state.resolver.backend().sessions);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("welfare server listening on {bind} (port {port})");

    let sweeper = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.cleanup_expired();
        }
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
        sweeper,
    })
}
