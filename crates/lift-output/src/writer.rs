//! The `TripWriter` trait implemented by output backends.

use crate::{CarSummaryRow, OutputResult, TripEventRow};

/// A sink for trip rows.
///
/// Errors are surfaced to the caller through
/// [`RecordStatus::take_error`](crate::RecordStatus::take_error), since
/// observer callbacks have no return value.
pub trait TripWriter: Send {
    fn write_event(&mut self, row: &TripEventRow) -> OutputResult<()>;

    /// Write the per-car totals, ordered by car id.
    fn write_summaries(&mut self, rows: &[CarSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
