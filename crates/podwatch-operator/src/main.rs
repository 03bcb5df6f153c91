//! Podwatch Operator - Pod Failure Detection Service
//!
//! Watches pods, classifies failures and logs them. Serves health
//! endpoints for the kubelet probes.
//!
//! # HTTP Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check (pod cache synced)

use podwatch_operator::{create_router, run_controller, OperatorConfig, Readiness};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,podwatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Podwatch Operator");

    let config = OperatorConfig::from_env();
    config.validate()?;

    tracing::info!(
        watch_namespace = config.watch_namespace.as_deref().unwrap_or("*"),
        listen_addr = %config.listen_addr,
        error_requeue_seconds = config.error_requeue_seconds,
        "Loaded operator configuration"
    );

    let client = kube::Client::try_default().await?;
    tracing::info!("Connected to Kubernetes cluster");

    let readiness = Readiness::new();

    tracing::info!(listen_addr = %config.listen_addr, "Starting health server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    let app = create_router(readiness.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Health server exited");
        }
    });

    // Runs until SIGTERM/SIGINT
    run_controller(client, config, readiness).await;

    tracing::info!("Podwatch Operator stopped");
    Ok(())
}
