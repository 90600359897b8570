//! Unit tests for lift-channel.

use lift_core::{Direction, Request};

fn req(from: i32, to: i32) -> Request {
    let direction = if to >= from { Direction::Up } else { Direction::Down };
    Request::new(from, to, direction)
}

// ── RequestChannel ────────────────────────────────────────────────────────────

#[cfg(test)]
mod request_channel_tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use lift_core::LiftError;

    use super::*;
    use crate::{RequestChannel, ShutdownSignal};

    #[test]
    fn take_returns_requests_in_fifo_order() {
        let channel = RequestChannel::new();
        let signal = ShutdownSignal::new();
        channel.add(req(0, 5)).unwrap();
        channel.add(req(3, 1)).unwrap();
        channel.add(req(7, 0)).unwrap();

        let listener = signal.listener();
        assert_eq!(channel.take(&listener).unwrap(), req(0, 5));
        assert_eq!(channel.take(&listener).unwrap(), req(3, 1));
        assert_eq!(channel.take(&listener).unwrap(), req(7, 0));
    }

    #[test]
    fn len_and_is_empty_track_contents() {
        let channel = RequestChannel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.len(), 0);

        channel.add(req(0, 1)).unwrap();
        channel.add(req(0, 2)).unwrap();
        assert!(!channel.is_empty());
        assert_eq!(channel.len(), 2);

        channel.try_take().unwrap();
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn try_take_on_empty_is_none() {
        let channel = RequestChannel::new();
        assert!(channel.try_take().is_none());
    }

    #[test]
    fn drain_empties_in_order() {
        let channel = RequestChannel::new();
        for to in 1..=4 {
            channel.add(req(0, to)).unwrap();
        }
        let drained = channel.drain();
        assert_eq!(drained, vec![req(0, 1), req(0, 2), req(0, 3), req(0, 4)]);
        assert!(channel.is_empty());
    }

    #[test]
    fn take_blocks_until_another_thread_adds() {
        let channel = Arc::new(RequestChannel::new());
        let signal = ShutdownSignal::new();
        let listener = signal.listener();

        let consumer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.take(&listener))
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!consumer.is_finished(), "take returned before anything was added");

        channel.add(req(2, 9)).unwrap();
        assert_eq!(consumer.join().unwrap().unwrap(), req(2, 9));
    }

    #[test]
    fn trigger_unblocks_a_waiting_take() {
        let channel = Arc::new(RequestChannel::new());
        let signal = ShutdownSignal::new();
        let listener = signal.listener();

        let consumer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.take(&listener))
        };

        thread::sleep(Duration::from_millis(20));
        signal.trigger();
        assert_eq!(consumer.join().unwrap(), Err(LiftError::Cancelled));
    }

    #[test]
    fn cancelled_take_leaves_queue_untouched() {
        let channel = RequestChannel::new();
        let signal = ShutdownSignal::new();
        channel.add(req(0, 3)).unwrap();
        signal.trigger();

        assert_eq!(channel.take(&signal.listener()), Err(LiftError::Cancelled));
        assert_eq!(channel.len(), 1, "cancellation must not consume the request");
    }

    #[test]
    fn many_producers_lose_nothing() {
        let channel = Arc::new(RequestChannel::new());
        let producers: Vec<_> = (0..4)
            .map(|p| {
                let channel = Arc::clone(&channel);
                thread::spawn(move || {
                    for i in 0..50 {
                        channel.add(req(p, p + i + 1)).unwrap();
                    }
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }
        assert_eq!(channel.drain().len(), 200);
    }
}

// ── ShutdownSignal ────────────────────────────────────────────────────────────

#[cfg(test)]
mod shutdown_tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::ShutdownSignal;

    #[test]
    fn fresh_signal_is_not_cancelled() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_triggered());
        assert!(!signal.listener().is_cancelled());
    }

    #[test]
    fn trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        assert!(signal.trigger());
        assert!(!signal.trigger());
        assert!(signal.is_triggered());
    }

    #[test]
    fn every_listener_observes_trigger() {
        let signal = ShutdownSignal::new();
        let listeners: Vec<_> = (0..5).map(|_| signal.listener()).collect();
        signal.trigger();
        assert!(listeners.iter().all(|l| l.is_cancelled()));
        // Listeners created after the fact see it too.
        assert!(signal.listener().is_cancelled());
    }

    #[test]
    fn wait_timeout_expires_without_trigger() {
        let signal = ShutdownSignal::new();
        assert!(!signal.listener().wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn wait_timeout_wakes_early_on_trigger() {
        let signal = ShutdownSignal::new();
        let listener = signal.listener();
        let waiter = thread::spawn(move || {
            let started = Instant::now();
            let fired = listener.wait_timeout(Duration::from_secs(10));
            (fired, started.elapsed())
        });

        thread::sleep(Duration::from_millis(20));
        signal.trigger();
        let (fired, waited) = waiter.join().unwrap();
        assert!(fired);
        assert!(waited < Duration::from_secs(5), "waited {waited:?}");
    }
}
