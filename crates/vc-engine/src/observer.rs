//! Observer hooks for logging and data collection.

use vc_behavior::ConversionRecord;
use vc_core::Tick;

use crate::{PlacementOutcome, PopulationCounts, TickSummary, WorkItem};

/// Callbacks invoked by [`Engine`][crate::Engine] at key points of a tick.
///
/// All methods default to no-ops.
///
/// # Example — conversion counter
///
/// ```rust,ignore
/// struct Conversions(usize);
///
/// impl CoordinationObserver for Conversions {
///     fn on_conversion(&mut self, _tick: Tick, _record: &ConversionRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait CoordinationObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// One drained work item and what handling it produced.  A region load
    /// yields one outcome per structure; a job-site claim up to two.
    fn on_work_item(&mut self, _tick: Tick, _item: &WorkItem, _outcomes: &[PlacementOutcome]) {}

    fn on_conversion(&mut self, _tick: Tick, _record: &ConversionRecord) {}

    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _counts: &PopulationCounts) {}

    /// Called once by [`Engine::run`][crate::Engine::run] after the final tick.
    fn on_end(&mut self, _final_tick: Tick) {}
}

/// A [`CoordinationObserver`] that does nothing.
pub struct NoopObserver;

impl CoordinationObserver for NoopObserver {}
