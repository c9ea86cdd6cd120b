mod api;
mod middleware;

use std::sync::Arc;

use efarmer_advisor::Advisor;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = efarmer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let registry = efarmer_core::load_facilities(&config.facilities_path)?;
    tracing::info!(
        facilities = registry.len(),
        path = %config.facilities_path.display(),
        "facility registry loaded"
    );

    let advisor = Advisor::from_app_config(&config)?;
    if advisor.is_standby() {
        tracing::warn!("GEMINI_API_KEY not set; advisory chat will answer with the standby reply");
    }

    let state = AppState {
        registry: Arc::new(registry),
        advisor: Arc::new(advisor),
        default_limit: config.locator_default_limit,
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "efarmer-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
