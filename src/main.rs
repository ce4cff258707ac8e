//! Standby HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use standby::config::Config;
use standby::gateway::{HandlerState, create_router_with_state};
use standby::lifecycle::LifecycleCoordinator;
use standby::notify::{LogNotifier, Notifier, TextbeltNotifier};
use standby::provision::{
    HttpInferenceClient, HttpProvisioner, InferenceClient, LocalInferenceClient, LocalProvisioner,
    Provisioner,
};
use standby::schedule::LocalScheduler;
use standby::store::MemoryStateStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model_id = %config.model_id,
        "Standby starting"
    );

    let (provisioner, inference): (Arc<dyn Provisioner>, Arc<dyn InferenceClient>) =
        match &config.control_url {
            Some(url) => (
                Arc::new(HttpProvisioner::new(
                    url.clone(),
                    config.model_name.clone(),
                    config.instance_type.clone(),
                )),
                Arc::new(HttpInferenceClient::new(url.clone())),
            ),
            None => {
                tracing::warn!("No STANDBY_CONTROL_URL configured, running provisioner in local mode");
                (
                    Arc::new(LocalProvisioner::new()),
                    Arc::new(LocalInferenceClient::new()),
                )
            }
        };

    let notifier: Arc<dyn Notifier> = match &config.textbelt_key {
        Some(key) => Arc::new(TextbeltNotifier::new(key.clone())),
        None => {
            tracing::warn!("No STANDBY_TEXTBELT_KEY configured, logging notifications instead");
            Arc::new(LogNotifier::new())
        }
    };

    let (scheduler, mut fired_rx) = LocalScheduler::new();

    let coordinator = Arc::new(LifecycleCoordinator::new(
        config.lifecycle_config(),
        Arc::new(MemoryStateStore::new()),
        provisioner,
        Arc::new(scheduler),
        notifier,
        inference,
    ));

    // Fired idle timers drive the shutdown executor.
    let shutdown_coordinator = Arc::clone(&coordinator);
    tokio::spawn(async move {
        while let Some(payload) = fired_rx.recv().await {
            if let Err(e) = shutdown_coordinator
                .handle_shutdown(&payload.endpoint_name)
                .await
            {
                tracing::error!(
                    endpoint = %payload.endpoint_name,
                    error = %e,
                    "shutdown after timer fire failed"
                );
            }
        }
    });

    let app = create_router_with_state(HandlerState::new(coordinator));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Standby shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
