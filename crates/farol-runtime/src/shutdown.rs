//! Process-lifetime cancellation.
//!
//! A single [`ShutdownTrigger`] is fired by the signal handler; every
//! in-flight runtime call holds a [`ShutdownSignal`] and abandons its child
//! process as soon as the trigger fires.

use std::sync::Arc;

use tokio::sync::watch;

/// Fires the shutdown signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<bool>>,
}

/// Observes the shutdown signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Creates a connected trigger/signal pair.
#[must_use]
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx: Arc::new(tx) }, ShutdownSignal { rx })
}

impl ShutdownTrigger {
    /// Requests shutdown. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send_replace(true);
    }
}

impl ShutdownSignal {
    /// Returns a signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested.
    ///
    /// If every trigger is dropped without firing, this never resolves.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn trigger_wakes_every_clone() {
        let (trigger, signal) = channel();
        let mut a = signal.clone();
        let mut b = signal;
        trigger.trigger();
        a.cancelled().await;
        b.cancelled().await;
        assert!(a.is_triggered());
    }

    #[tokio::test]
    async fn dropped_trigger_does_not_cancel() {
        let (trigger, mut signal) = channel();
        drop(trigger);
        let waited = tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(waited.is_err());
        assert!(!signal.is_triggered());
    }
}
