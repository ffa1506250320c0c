//! Shared gateway serve entrypoint, used by the binary and the tests.

use crate::{
    AppState, GatewayConfig, SessionManager,
    api,
    chat::ChatOptions,
    config::SessionConfig,
    provider::build_provider,
};
use anyhow::Result;
use care::health::Record;
use llm::Generator;
use std::{sync::Arc, time::Duration};
use tokio::{sync::oneshot, task::JoinHandle};

/// Handle returned by [`serve`], holds the bound port and shutdown trigger.
pub struct ServeHandle {
    /// The port the gateway is listening on.
    pub port: u16,
    /// Send a value to trigger graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Join handle for the server task.
    join: Option<JoinHandle<Result<(), std::io::Error>>>,
    /// Idle-session sweeper, if enabled.
    sweeper: Option<JoinHandle<()>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Build the configured generator and serve with it.
pub async fn serve_with_config(config: &GatewayConfig, bind: &str) -> Result<ServeHandle> {
    let generator = build_provider(&config.llm, llm::Client::new())?;
    let system_prompt = Some(config.llm.system_prompt.clone()).filter(|p| !p.trim().is_empty());

    let state = AppState {
        sessions: Arc::new(SessionManager::new()),
        generator,
        chat: Arc::new(ChatOptions {
            system_prompt,
            timeout: config.llm.timeout(),
        }),
        record: Arc::new(Record::sample()),
        seed: config.session.seed,
    };
    serve(state, &config.session, bind).await
}

/// Bind the axum server and start serving `state`.
///
/// The server runs in a spawned task; call `handle.shutdown()` to stop it.
pub async fn serve<G: Generator + 'static>(
    state: AppState<G>,
    session: &SessionConfig,
    bind: &str,
) -> Result<ServeHandle> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("gateway listening on {bind} (port {port})");

    let sweeper = (session.sweep_secs > 0).then(|| {
        spawn_sweeper(
            Arc::clone(&state.sessions),
            Duration::from_secs(session.sweep_secs),
            session.ttl_secs,
        )
    });
    let app = api::router(state);

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

/// Periodically drop sessions idle for longer than `ttl_secs`.
fn spawn_sweeper(
    sessions: Arc<SessionManager>,
    every: Duration,
    ttl_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.cleanup_expired(ttl_secs);
        }
    })
}
