//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast trigger that stops the HTTP server.
///
/// The binary relies on OS signals alone; tests and embedders hold a
/// `Shutdown` and call [`trigger`](Self::trigger) to stop a server they
/// started.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to [`HttpServer::run`](crate::http::HttpServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop. A trigger with no live
    /// subscribers is a no-op.
    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Shutdown triggered with no running server");
        }
    }

    /// Number of servers still listening for the trigger.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
