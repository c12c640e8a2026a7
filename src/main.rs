/*!
 * CPU Scheduler Simulator - Main Entry Point
 *
 * Serves scheduling simulations over newline-delimited JSON:
 * - FCFS, SJF, Priority and Round-Robin
 * - Per-session simulation history with retention
 */

use std::error::Error;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use cpu_scheduler::{
    init_tracing, HistoryStore, SchedulerService, ServerConfig, ServerLifecycle, SimulationServer,
    TaskRegistry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("CPU scheduler simulator starting...");
    let config = ServerConfig::from_env()?;
    info!(
        address = %config.address,
        timeout_secs = config.request_timeout.as_secs(),
        max_per_session = config.retention.max_per_session,
        "Configuration loaded"
    );

    let history = match &config.history_path {
        Some(path) if path.exists() => match HistoryStore::load_snapshot(path, config.retention) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load history snapshot, starting empty");
                HistoryStore::with_policy(config.retention)
            }
        },
        _ => HistoryStore::with_policy(config.retention),
    };

    // Background retention sweep
    let purge_store = history.clone();
    let purge_interval = config.purge_interval;
    let purge_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purge_interval);
        loop {
            ticker.tick().await;
            purge_store.purge_expired(OffsetDateTime::now_utc());
        }
    });

    let service = SchedulerService::new(TaskRegistry::new(), history.clone());
    let server = Arc::new(SimulationServer::new(config.clone(), service));

    let serving = server.clone();
    let mut server_task = tokio::spawn(async move { serving.start().await });

    info!("Press Ctrl+C to exit");
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Shutdown signal received");
            server.stop().await?;
        }
        finished = &mut server_task => {
            purge_task.abort();
            return match finished {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => Err(e.into()),
            };
        }
    }

    purge_task.abort();
    match server_task.await {
        Ok(Err(e)) => error!(error = %e, "Server stopped with error"),
        Err(e) => error!(error = %e, "Server task panicked"),
        Ok(Ok(())) => {}
    }

    if let Some(path) = &config.history_path {
        history.save_snapshot(path)?;
    }

    info!("CPU scheduler simulator stopped");
    Ok(())
}
