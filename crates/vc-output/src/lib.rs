//! `vc-output` — population and conversion logs.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `population.csv`, `conversions.csv`    |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`PopulationLogObserver`], which implements
//! `vc_engine::CoordinationObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vc_output::{CsvWriter, PopulationLogObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PopulationLogObserver::new(writer);
//! engine.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PopulationLogObserver;
pub use row::{ConversionRow, PopulationRow};
pub use writer::OutputWriter;
