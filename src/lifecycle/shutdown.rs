//! Shutdown coordination for the proxy.

use std::sync::Arc;
use tokio::sync::watch;

/// Graceful shutdown flag shared by the signal task and the server.
///
/// The flag is sticky: a listener created after `trigger` still sees it,
/// so a signal that lands before the server starts serving is not lost.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

/// One listener's view of the shutdown flag.
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// A listener for the server or a background task.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every listener to stop. Repeated calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered or every `Shutdown` handle is gone.
    pub async fn recv(mut self) {
        let _ = self.rx.wait_for(|stopping| *stopping).await;
    }
}
