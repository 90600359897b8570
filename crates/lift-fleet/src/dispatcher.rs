//! The dispatcher: moves requests from the system channel to cars.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use lift_channel::{RequestChannel, ShutdownListener};
use lift_core::LiftError;
use log::{debug, error, warn};

use crate::{Fleet, FleetError, FleetResult};

/// Handle to the running `dispatcher` thread.
pub struct Dispatcher {
    handle: JoinHandle<FleetResult<u64>>,
}

impl Dispatcher {
    /// Spawn the `dispatcher` thread.  It runs until `shutdown` fires or a
    /// fault stops it.
    pub fn spawn(
        requests: Arc<RequestChannel>,
        fleet: Arc<Fleet>,
        shutdown: ShutdownListener,
    ) -> FleetResult<Self> {
        let handle = thread::Builder::new()
            .name("dispatcher".into())
            .spawn(move || {
                let _exit = ExitGuard(&fleet);
                dispatch_loop(&requests, &fleet, &shutdown)
            })?;
        Ok(Self { handle })
    }

    /// Wait for the thread and return how many requests it dispatched.
    pub fn join(self) -> FleetResult<u64> {
        self.handle
            .join()
            .map_err(|_| FleetError::Panicked("dispatcher".into()))?
    }
}

/// Take each request from `requests` and hand it to `fleet`.  Returns the
/// number dispatched once `shutdown` fires.
///
/// If the fleet has stopped, the request in hand goes back on `requests`
/// and the loop ends.  Any other queue or selection fault is logged and
/// ends the loop with that error.
pub fn dispatch_loop(
    requests: &RequestChannel,
    fleet: &Fleet,
    shutdown: &ShutdownListener,
) -> FleetResult<u64> {
    let mut dispatched = 0;
    loop {
        let request = match requests.take(shutdown) {
            Ok(request) => request,
            Err(LiftError::Cancelled) => {
                debug!("dispatcher exiting after {dispatched} requests");
                return Ok(dispatched);
            }
            Err(e) => {
                error!("dispatcher stopped: {e}");
                return Err(e.into());
            }
        };
        match fleet.select(request) {
            Ok(_) => dispatched += 1,
            Err(FleetError::Stopped) => {
                warn!("fleet stopped; {request} goes back to the queue");
                requests.add(request)?;
                return Ok(dispatched);
            }
            Err(e) => {
                error!("dispatcher failed to assign {request}: {e}");
                return Err(e);
            }
        }
    }
}

/// Tells the fleet the dispatcher is gone, even on unwind.
struct ExitGuard<'a>(&'a Fleet);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.0.note_dispatcher_exit();
    }
}
