use std::future::Future;

use tokio::signal;
use tokio::sync::oneshot;

/// Register the SIGINT/SIGTERM handlers and listen for them in the background.
///
/// The handlers are in place when this returns, so a signal that arrives
/// during the first poll cycle stops the bot after that cycle instead of
/// killing the process. The returned future resolves once a signal has been
/// received.
pub fn listen_for_shutdown() -> std::io::Result<impl Future<Output = ()>> {
    let (tx, rx) = oneshot::channel::<()>();

    #[cfg(unix)]
    {
        let mut interrupt = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::spawn(async move {
            tokio::select! {
                _ = interrupt.recv() => {
                    tracing::info!("Received Ctrl+C, stopping after the current cycle...");
                }
                _ = terminate.recv() => {
                    tracing::info!("Received SIGTERM, stopping after the current cycle...");
                }
            }
            let _ = tx.send(());
        });
    }

    #[cfg(not(unix))]
    {
        let mut ctrl_c = signal::windows::ctrl_c()?;

        tokio::spawn(async move {
            ctrl_c.recv().await;
            tracing::info!("Received Ctrl+C, stopping after the current cycle...");
            let _ = tx.send(());
        });
    }

    Ok(async move {
        let _ = rx.await;
    })
}
