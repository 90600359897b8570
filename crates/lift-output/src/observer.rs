//! `TripRecordObserver<W>`: bridges `TripObserver` to a `TripWriter`.

use std::collections::BTreeMap;
use std::sync::Arc;

use lift_core::{CarId, Floor, Request};
use lift_fleet::{TripEvent, TripObserver};
use log::error;
use parking_lot::Mutex;

use crate::row::{CarSummaryRow, TripEventKind, TripEventRow};
use crate::writer::TripWriter;
use crate::{OutputError, OutputResult};

/// A [`TripObserver`] that writes every event, then per-car totals, to any
/// [`TripWriter`] backend.
///
/// The observer is moved onto the trip-events thread when the tower starts,
/// so results come back through a [`RecordStatus`] handle taken beforehand
/// with [`status`](Self::status).
pub struct TripRecordObserver<W: TripWriter> {
    writer: W,
    seq:    u64,
    cars:   BTreeMap<u32, CarSummaryRow>,
    status: RecordStatus,
}

impl<W: TripWriter> TripRecordObserver<W> {
    /// Cars appear in the summary once they produce their first event.
    pub fn new(writer: W) -> Self {
        Self { writer, seq: 0, cars: BTreeMap::new(), status: RecordStatus::default() }
    }

    /// Every car gets a summary row, car `i` starting at `floors[i]`.
    pub fn with_start_floors(writer: W, floors: &[Floor]) -> Self {
        let mut observer = Self::new(writer);
        for (i, &floor) in floors.iter().enumerate() {
            // A fleet never holds more cars than fit a car id.
            let Ok(CarId(car)) = CarId::try_from(i) else { break };
            observer.cars.insert(car, CarSummaryRow::new(car, floor));
        }
        observer
    }

    /// A handle that outlives the observer.
    pub fn status(&self) -> RecordStatus {
        self.status.clone()
    }

    fn record(&mut self, event: TripEvent) {
        let row = TripEventRow::from_event(self.seq, &event);
        self.seq += 1;

        let summary = self
            .cars
            .entry(row.car)
            .or_insert_with(|| CarSummaryRow::new(row.car, row.floor));
        summary.final_floor = row.floor;
        match row.kind {
            TripEventKind::Moved => summary.floors_travelled += 1,
            TripEventKind::Completed => summary.trips_completed += 1,
            TripEventKind::Abandoned => summary.trips_abandoned += 1,
            TripEventKind::Pickup | TripEventKind::Delivery => {}
        }

        let result = self.writer.write_event(&row);
        if result.is_ok() {
            self.status.inner.lock().events_written += 1;
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            let mut status = self.status.inner.lock();
            // Keep only the first error.
            if status.error.is_none() {
                error!("trip output failed: {e}");
                status.error = Some(e);
            }
        }
    }
}

impl<W: TripWriter> TripObserver for TripRecordObserver<W> {
    fn on_pickup(&mut self, car: CarId, request: &Request, from: Floor) {
        self.record(TripEvent::Pickup { car, request: *request, from });
    }

    fn on_moved(&mut self, car: CarId, floor: Floor) {
        self.record(TripEvent::Moved { car, floor });
    }

    fn on_delivery(&mut self, car: CarId, request: &Request) {
        self.record(TripEvent::Delivery { car, request: *request });
    }

    fn on_completed(&mut self, car: CarId, request: &Request) {
        self.record(TripEvent::Completed { car, request: *request });
    }

    fn on_abandoned(&mut self, car: CarId, request: &Request, floor: Floor) {
        self.record(TripEvent::Abandoned { car, request: *request, floor });
    }

    fn on_finish(&mut self) {
        let summaries: Vec<_> = self.cars.values().copied().collect();
        let result = self.writer.write_summaries(&summaries);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);

        let mut status = self.status.inner.lock();
        status.summaries = summaries;
        status.finished = true;
    }
}

// ── RecordStatus ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct StatusInner {
    error:          Option<OutputError>,
    events_written: u64,
    summaries:      Vec<CarSummaryRow>,
    finished:       bool,
}

/// Shared view of a [`TripRecordObserver`]'s progress.
#[derive(Clone, Default)]
pub struct RecordStatus {
    inner: Arc<Mutex<StatusInner>>,
}

impl RecordStatus {
    /// Take the stored write error (if any) after the run ends.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.inner.lock().error.take()
    }

    pub fn events_written(&self) -> u64 {
        self.inner.lock().events_written
    }

    /// Per-car totals, ordered by car id.  Empty until the observer
    /// finishes.
    pub fn summaries(&self) -> Vec<CarSummaryRow> {
        self.inner.lock().summaries.clone()
    }

    /// `true` once the trip-events thread has delivered its last event.
    pub fn is_finished(&self) -> bool {
        self.inner.lock().finished
    }
}
