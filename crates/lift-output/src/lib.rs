//! `lift-output`: trip observers for the lift_bank simulation.
//!
//! | Observer                | Output                                               |
//! |-------------------------|------------------------------------------------------|
//! | [`LogObserver`]         | one `log` line per pickup and delivery               |
//! | [`TripRecordObserver`]  | any [`TripWriter`]; [`CsvTripWriter`] creates        |
//! |                         | `trip_events.csv` and `car_summaries.csv`            |
//!
//! Both implement `lift_fleet::TripObserver`.  Combine them with
//! `lift_fleet::FanoutObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_fleet::{FanoutObserver, Tower};
//! use lift_output::{CsvTripWriter, LogObserver, TripRecordObserver};
//!
//! let recorder = TripRecordObserver::new(CsvTripWriter::new(Path::new("./output"))?);
//! let status = recorder.status();
//! let tower = Tower::with_observer(&config, FanoutObserver::new().with(LogObserver).with(recorder))?;
//! // … run, shut down, await termination …
//! if let Some(e) = status.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod logging;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTripWriter;
pub use error::{OutputError, OutputResult};
pub use logging::{LogObserver, TRIP_LOG_TARGET};
pub use observer::{RecordStatus, TripRecordObserver};
pub use row::{CarSummaryRow, TripEventKind, TripEventRow};
pub use writer::TripWriter;
