mod config;
mod db;
mod error;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::llm::LlmChat;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let pool = db::init_pool(&config.database_url, config.pool)
        .await
        .expect("database init failed");

    // AI endpoints answer 503 while the model is unconfigured.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            info!(model = client.model(), "LLM client ready");
            Some(client)
        }
        Err(e) => {
            warn!(error = %e, "LLM not configured; AI features disabled");
            None
        }
    };

    let purge = services::session::spawn_purge_task(pool.clone(), SESSION_PURGE_INTERVAL);

    let addr = format!("0.0.0.0:{}", config.port);
    let state = state::AppState::new(pool, llm, config);
    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            warn!(error = %e, "web client unavailable; serving the API only");
            routes::app(state)
        }
    };
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("failed to bind");
    info!(%addr, "pantry server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    purge.abort();
    info!("pantry server stopped");
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
    info!("shutdown requested");
}
