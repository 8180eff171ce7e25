//! `PopulationLogObserver<W>` — bridges `CoordinationObserver` to an
//! `OutputWriter`.

use tracing::warn;

use vc_behavior::ConversionRecord;
use vc_core::Tick;
use vc_engine::{CoordinationObserver, PopulationCounts};

use crate::row::{ConversionRow, PopulationRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`CoordinationObserver`] that logs population snapshots and conversions
/// to any [`OutputWriter`].
///
/// Observer methods cannot fail, so the first write error is kept and
/// returned by [`take_error`][Self::take_error] after the run.  Later writes
/// are still attempted.
pub struct PopulationLogObserver<W: OutputWriter> {
    writer:      W,
    rows:        usize,
    first_error: Option<OutputError>,
}

impl<W: OutputWriter> PopulationLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, first_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Rows successfully written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, result: OutputResult<()>) {
        match result {
            Ok(()) => self.rows += 1,
            Err(e) => {
                if self.first_error.is_none() {
                    warn!(error = %e, "log write failed");
                    self.first_error = Some(e);
                }
            }
        }
    }
}

impl<W: OutputWriter> CoordinationObserver for PopulationLogObserver<W> {
    fn on_conversion(&mut self, tick: Tick, record: &ConversionRecord) {
        let result = self.writer.write_conversion(&ConversionRow::new(tick, record));
        self.record(result);
    }

    fn on_snapshot(&mut self, counts: &PopulationCounts) {
        let result = self.writer.write_population(&PopulationRow::from(counts));
        self.record(result);
    }

    fn on_end(&mut self, _final_tick: Tick) {
        if let Err(e) = self.writer.finish() {
            if self.first_error.is_none() {
                warn!(error = %e, "log flush failed");
                self.first_error = Some(e);
            }
        }
    }
}
