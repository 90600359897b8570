//! The `requester` thread: submits requests at a fixed rate.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use lift_channel::ShutdownListener;
use lift_fleet::Tower;
use log::{debug, info};

use crate::{RequestSource, SimError, SimResult};

/// Handle to a running `requester` thread.
pub struct Requester {
    handle: JoinHandle<SimResult<usize>>,
}

impl Requester {
    pub fn spawn(
        tower: Arc<Tower>,
        mut source: Box<dyn RequestSource>,
        period: Duration,
        stop: ShutdownListener,
    ) -> SimResult<Self> {
        let handle = thread::Builder::new()
            .name("requester".into())
            .spawn(move || submit_at_fixed_rate(&tower, source.as_mut(), period, &stop))?;
        Ok(Self { handle })
    }

    /// Wait for the source to run dry (or the stop signal) and return how
    /// many requests were submitted.
    pub fn join(self) -> SimResult<usize> {
        self.handle.join().map_err(|_| SimError::RequesterPanicked)?
    }
}

/// Submit every request `source` yields to `tower`: the first at once, then
/// one per `period`, measured from the start so slow submits do not drift
/// the schedule.  Stops early when `stop` fires.
pub fn submit_at_fixed_rate(
    tower: &Tower,
    source: &mut dyn RequestSource,
    period: Duration,
    stop: &ShutdownListener,
) -> SimResult<usize> {
    let mut due = Instant::now();
    let mut submitted = 0usize;
    while let Some(request) = source.next_request() {
        if submitted > 0 {
            due += period;
            if stop.wait_timeout(due.saturating_duration_since(Instant::now())) {
                break;
            }
        } else if stop.is_cancelled() {
            break;
        }
        tower.submit(request)?;
        submitted += 1;
        debug!("submitted request #{submitted}: {request}");
    }
    info!("request generation complete: {submitted} submitted");
    Ok(submitted)
}
