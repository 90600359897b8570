//! Cooperative cancellation.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;

/// One-shot shutdown trigger.
///
/// Holds the only `Sender` of a channel that never carries a message.
/// [`trigger`](Self::trigger) drops it, so every [`ShutdownListener`] sees
/// the channel disconnect at the same instant, including listeners currently
/// parked inside `select!`.
pub struct ShutdownSignal {
    trigger:  Mutex<Option<Sender<()>>>,
    listener: ShutdownListener,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            trigger:  Mutex::new(Some(tx)),
            listener: ShutdownListener { rx },
        }
    }

    /// A listener for this signal.  Cheap to clone and `Send`.
    pub fn listener(&self) -> ShutdownListener {
        self.listener.clone()
    }

    /// Fire the signal.
    ///
    /// Idempotent.  Returns `true` only for the call that actually fired it.
    pub fn trigger(&self) -> bool {
        self.trigger.lock().take().is_some()
    }

    pub fn is_triggered(&self) -> bool {
        self.trigger.lock().is_none()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`ShutdownSignal`].
#[derive(Clone)]
pub struct ShutdownListener {
    rx: Receiver<()>,
}

impl ShutdownListener {
    /// Non-blocking check.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for up to `timeout`, waking early if the signal fires.
    ///
    /// Returns `true` if the signal fired (before or during the wait).
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        matches!(self.rx.recv_timeout(timeout), Err(RecvTimeoutError::Disconnected))
    }

    /// The raw receiver, for use as a `select!` arm.  It becomes ready
    /// (with `Err`) once the signal fires.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}
