//! `lift-channel`: the hand-off primitives shared by producers, the
//! dispatcher, and the cars.
//!
//! | Type                 | Role                                               |
//! |----------------------|----------------------------------------------------|
//! | [`RequestChannel`]   | Unbounded FIFO; non-blocking `add`, blocking `take` |
//! | [`ShutdownSignal`]   | One-shot, idempotent cancellation trigger           |
//! | [`ShutdownListener`] | Cloneable view of a signal, observed by `take`      |
//!
//! Both are built on `crossbeam-channel`: the request queue is an unbounded
//! channel, and the shutdown signal is a channel that never carries a value.
//! Triggering drops its only sender, which every listener observes as a
//! disconnect.
//!
//! ```rust,ignore
//! let signal = ShutdownSignal::new();
//! let inbox  = RequestChannel::new();
//! inbox.add(Request::up_from_ground(5))?;
//! let next = inbox.take(&signal.listener())?;
//! signal.trigger();
//! assert_eq!(inbox.take(&signal.listener()), Err(LiftError::Cancelled));
//! ```

pub mod request_channel;
pub mod shutdown;

#[cfg(test)]
mod tests;

pub use request_channel::RequestChannel;
pub use shutdown::{ShutdownListener, ShutdownSignal};
