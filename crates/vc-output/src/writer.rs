//! The `OutputWriter` trait implemented by log backends.

use crate::{ConversionRow, OutputResult, PopulationRow};

/// Trait implemented by log writers.
///
/// Errors are stored by the observer and retrieved with
/// [`PopulationLogObserver::take_error`][crate::PopulationLogObserver::take_error].
pub trait OutputWriter {
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()>;

    fn write_conversion(&mut self, row: &ConversionRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
