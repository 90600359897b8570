//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trip_events.csv`
//! - `car_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TripWriter;
use crate::{CarSummaryRow, OutputResult, TripEventRow};

/// Writes trip output to two CSV files.
pub struct CsvTripWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTripWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("trip_events.csv"))?;
        events.write_record(["seq", "car", "kind", "floor", "pickup_floor", "destination_floor"])?;

        let mut summaries = Writer::from_path(dir.join("car_summaries.csv"))?;
        summaries.write_record([
            "car",
            "trips_completed",
            "trips_abandoned",
            "floors_travelled",
            "final_floor",
        ])?;

        Ok(Self { events, summaries, finished: false })
    }
}

fn optional(floor: Option<i32>) -> String {
    floor.map(|f| f.to_string()).unwrap_or_default()
}

impl TripWriter for CsvTripWriter {
    fn write_event(&mut self, row: &TripEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.seq.to_string(),
            row.car.to_string(),
            row.kind.as_str().to_string(),
            row.floor.to_string(),
            optional(row.pickup_floor),
            optional(row.destination_floor),
        ])?;
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[CarSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.car.to_string(),
                row.trips_completed.to_string(),
                row.trips_abandoned.to_string(),
                row.floors_travelled.to_string(),
                row.final_floor.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
