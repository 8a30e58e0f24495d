// Shutdown Token

use tokio::sync::watch;

/// Shutdown signal for graceful termination of background tasks and the HTTP server
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for shutdown signal (returns immediately if already signalled)
    pub async fn wait(&mut self) {
        if self.is_shutdown() {
            return;
        }
        let _ = self.rx.changed().await;
    }
}

/// Shutdown sender
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to every token holder
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
