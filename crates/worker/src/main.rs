use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use vendorpo_notifications::{MailConfig, Notifier};
use vendorpo_worker::config::WorkerConfig;
use vendorpo_worker::sweeper::SessionSweeper;
use vendorpo_worker::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = WorkerConfig::from_env()?;
    tracing::info!(
        sweep_interval_secs = config.sweep_interval.as_secs(),
        "Worker starting"
    );

    // --- Database ---
    let pool = vendorpo_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    vendorpo_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database connection established");

    vendorpo_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Notifications ---
    // Resolving the transport up front surfaces relay misconfiguration at boot.
    // Sends made later retry the initialization if this attempt failed.
    let notifier = Notifier::new(MailConfig::from_env());
    if let Err(e) = notifier.init().await {
        tracing::warn!(error = %e, "Mail transport unavailable at startup");
    }

    // --- Session sweeper ---
    let sweep_cancel = CancellationToken::new();
    let sweeper = SessionSweeper::new(pool.clone(), config.sweep_interval);
    let sweep_handle = {
        let cancel = sweep_cancel.clone();
        tokio::spawn(async move { sweeper.run(cancel).await })
    };
    tracing::info!("Session sweeper started");

    shutdown_signal().await;

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Session sweeper stopped");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
