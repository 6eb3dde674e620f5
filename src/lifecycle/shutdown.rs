//! Shutdown coordination for the service.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Latched shutdown flag shared between the signal watcher and the server.
///
/// Once triggered it stays triggered: a waiter created after the trigger
/// resolves immediately instead of missing the signal.
#[derive(Debug, Clone)]
pub struct Shutdown {
    triggered: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            triggered: Arc::new(tx),
        }
    }

    /// Resolves once [`Shutdown::trigger`] has been called.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.triggered.subscribe();
        async move {
            let _ = rx.wait_for(|triggered| *triggered).await;
        }
    }

    /// Latch the flag. Returns `false` if shutdown was already under way.
    pub fn trigger(&self) -> bool {
        let first = self
            .triggered
            .send_if_modified(|triggered| !std::mem::replace(triggered, true));
        if first {
            tracing::info!("Shutdown triggered");
        }
        first
    }

    pub fn is_triggered(&self) -> bool {
        *self.triggered.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
