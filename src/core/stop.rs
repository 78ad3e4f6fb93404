//! # Single-slot stop signal.
//!
//! [`StopSignal`] carries shutdown requests from any thread to the
//! supervisor's blocking run loop with a **send-or-drop** contract:
//!
//! - [`request`](StopSignal::request) never blocks. If the slot is empty the
//!   request is accepted; if a request is already pending it is dropped
//!   silently. Duplicate calls are successful no-ops.
//! - [`wait`](StopSignal::wait) consumes at most one pending request per
//!   call.
//!
//! The slot is allocated once at construction and never reallocated. A
//! request that arrives before the waiter reaches [`wait`](StopSignal::wait)
//! is not guaranteed to be observed; at most one pending request is honored
//! once the wait begins. Callers must not rely on early requests being
//! remembered beyond that single slot.

use tokio::sync::{mpsc, Mutex};

/// Single-slot, non-blocking shutdown signal.
pub(crate) struct StopSignal {
    tx: mpsc::Sender<()>,
    rx: Mutex<mpsc::Receiver<()>>,
}

impl StopSignal {
    /// Allocates the slot.
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Requests a stop. Returns whether the request was accepted
    /// (`false` means one was already pending and this one was dropped).
    pub(crate) fn request(&self) -> bool {
        self.tx.try_send(()).is_ok()
    }

    /// Waits until a stop request is pending and consumes it.
    pub(crate) async fn wait(&self) {
        // recv() returning None would require every sender to be dropped,
        // which cannot happen while self holds tx.
        let _ = self.rx.lock().await.recv().await;
    }
}
