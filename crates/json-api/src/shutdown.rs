//! Graceful shutdown signal handling

use std::{future::Future, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::{signal, time};
use tracing::{info, warn};

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

async fn terminate() -> Result<(), ShutdownSignalError> {
    #[cfg(unix)]
    {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok(())
    }

    #[cfg(not(unix))]
    {
        std::future::pending().await
    }
}

/// Wait for Ctrl+C or SIGTERM, then stop accepting connections and give
/// in-flight requests up to `grace` to finish.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;
            info!("ctrl_c signal received");
        }
        result = terminate() => {
            result?;
            info!("terminate signal received");
        }
    };

    info!(grace_seconds = grace.as_secs(), "shutting down gracefully");

    handle.stop_graceful(Some(grace));

    Ok(())
}

/// Run a teardown `step`, abandoning it once `grace` has passed.
///
/// Returns whether the step finished in time.
pub(crate) async fn within_grace(step: &str, grace: Duration, task: impl Future<Output = ()>) -> bool {
    if time::timeout(grace, task).await.is_ok() {
        return true;
    }

    warn!(grace_seconds = grace.as_secs(), "{step} did not finish in time, forcing it closed");

    false
}
