use tokio_util::sync::CancellationToken;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Wait for a termination signal, then cancel the sync scheduler
pub async fn handle_signals(shutdown: CancellationToken) {
    wait_for_signal().await;
    shutdown.cancel();
}

/// Platform-specific signal handling implementation
#[cfg(unix)]
async fn wait_for_signal() {
    // Handle SIGTERM (sent by Kubernetes when pod is terminating)
    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to create SIGTERM signal handler");
    // Handle SIGINT (Ctrl+C)
    let mut sigint =
        signal(SignalKind::interrupt()).expect("Failed to create SIGINT signal handler");

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

/// Platform-specific signal handling implementation
#[cfg(windows)]
async fn wait_for_signal() {
    // Handle Ctrl+C
    let mut ctrlc = ctrl_c().expect("Failed to create Ctrl+C signal handler");
    // Handle Ctrl+Break
    let mut ctrlbreak = ctrl_break().expect("Failed to create Ctrl+Break signal handler");

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }
}
