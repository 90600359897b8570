//! `RequestChannel`: unbounded producer/consumer hand-off.

use crossbeam_channel::{select, unbounded, Receiver, Sender};

use lift_core::{LiftError, LiftResult, Request};

use crate::ShutdownListener;

/// Unbounded FIFO of [`Request`]s.
///
/// The channel keeps both ends alive for as long as it exists, so `add`
/// cannot observe a disconnected receiver and `take` cannot observe a
/// disconnected sender in normal operation.  Both still map that case to
/// [`LiftError::QueueFault`] rather than panic.
///
/// Share between threads behind an `Arc`.
pub struct RequestChannel {
    tx: Sender<Request>,
    rx: Receiver<Request>,
}

impl RequestChannel {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Enqueue `request`.  Never blocks.
    pub fn add(&self, request: Request) -> LiftResult<()> {
        self.tx
            .send(request)
            .map_err(|_| LiftError::QueueFault("request channel receiver is gone".into()))
    }

    /// Dequeue the oldest request, blocking until one arrives or `shutdown`
    /// fires.
    ///
    /// A signal that has already fired wins over queued requests: the call
    /// returns [`LiftError::Cancelled`] and leaves the queue untouched.
    pub fn take(&self, shutdown: &ShutdownListener) -> LiftResult<Request> {
        if shutdown.is_cancelled() {
            return Err(LiftError::Cancelled);
        }
        select! {
            recv(self.rx) -> msg => msg
                .map_err(|_| LiftError::QueueFault("request channel sender is gone".into())),
            recv(shutdown.receiver()) -> _ => Err(LiftError::Cancelled),
        }
    }

    /// Dequeue the oldest request if one is ready.
    pub fn try_take(&self) -> Option<Request> {
        self.rx.try_recv().ok()
    }

    /// Remove and return everything still queued, oldest first.
    pub fn drain(&self) -> Vec<Request> {
        self.rx.try_iter().collect()
    }

    /// Point-in-time emptiness check.  Racy by nature.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Point-in-time queue length.  Racy by nature.
    pub fn len(&self) -> usize {
        self.rx.len()
    }
}

impl Default for RequestChannel {
    fn default() -> Self {
        Self::new()
    }
}
