//! The `Engine` struct and its tick loop.

use tracing::{debug, info};

use vc_behavior::{AgentConversionService, BehaviorUnit, CoordState, UnitKind};
use vc_core::{AgentId, BlockBox, BlockPos, EngineConfig, SimClock, Tick, UnitId};
use vc_world::World;

use crate::{CoordinationObserver, JobBlockPairingCoordinator, PlacementOutcome, PopulationCounts, WorkItem, WorkQueue};

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub work_items:  usize,
    pub swept:       usize,
    pub conversions: usize,
}

/// The coordination engine bound to one world.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<W: World> {
    pub config:      EngineConfig,
    pub clock:       SimClock,
    pub world:       W,
    /// Units, listeners and conversion candidates.
    pub state:       CoordState,
    pub coordinator: JobBlockPairingCoordinator,
    pub conversions: AgentConversionService,
    pub(crate) work: WorkQueue,
}

impl<W: World> Engine<W> {
    // ── World event callbacks ─────────────────────────────────────────────
    //
    // Each only enqueues; handling happens in the next `tick`.

    pub fn on_block_placed(&mut self, pos: BlockPos) {
        self.defer(WorkItem::Placed { pos });
    }

    pub fn on_block_removed(&mut self, pos: BlockPos) {
        self.defer(WorkItem::Removed { pos });
    }

    pub fn on_region_loaded(&mut self, bbox: BlockBox) {
        self.defer(WorkItem::RegionLoaded { bbox });
    }

    pub fn on_job_site_claimed(&mut self, agent: AgentId) {
        self.defer(WorkItem::JobSiteClaimed { agent });
    }

    fn defer(&mut self, item: WorkItem) {
        self.work.push(self.clock.current_tick, item);
    }

    /// Work items waiting for the next tick.
    pub fn pending_work(&self) -> usize {
        self.work.len()
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: CoordinationObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer);
        }
        observer.on_end(self.clock.current_tick);
        info!(final_tick = %self.clock.current_tick, "run complete");
    }

    /// Run exactly `n` ticks, ignoring `end_tick`.
    pub fn run_ticks<O: CoordinationObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Process the current tick and advance the clock.
    pub fn tick<O: CoordinationObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer);
        observer.on_tick_end(now, &summary);

        if now.is_every(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(&self.population());
        }
        self.clock.advance();
        summary
    }

    /// Units of `agent` due at the current tick, in priority order, as the
    /// agent's goal selector runs them.  Each returned unit is marked as run
    /// now and goes back on its cooldown; a storage change brings it back
    /// early.
    pub fn run_ready_units(&mut self, agent: AgentId) -> Vec<UnitId> {
        let now = self.clock.current_tick;
        let ready = self.state.units.ready_units(agent, now);
        let kinds: Vec<UnitKind> = self
            .state
            .units
            .units_of(agent)
            .iter()
            .filter(|u| ready.contains(&u.id()))
            .map(BehaviorUnit::kind)
            .collect();
        for kind in kinds {
            if let Some(unit) = self.state.units.get_mut(agent, kind) {
                unit.complete_run(now);
            }
        }
        ready
    }

    /// Current population and bookkeeping counts.
    pub fn population(&self) -> PopulationCounts {
        PopulationCounts::collect(self.clock.current_tick, &self.world, &self.state)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: CoordinationObserver>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        let mut summary = TickSummary::default();

        // ── Phase 1: deferred work ────────────────────────────────────────
        //
        // Drained up front so anything enqueued while handling waits for the
        // next tick.
        let items = self.work.drain_due(now);
        summary.work_items = items.len();
        for item in items {
            let outcomes = self.handle(&item);
            observer.on_work_item(now, &item, &outcomes);
        }

        // ── Phase 2: dead-agent sweep ─────────────────────────────────────
        summary.swept = self.state.sweep_dead(&mut self.world).len();

        // ── Phase 3: conversion sweep ─────────────────────────────────────
        if now.is_every(self.config.conversion_sweep_interval_ticks) {
            summary.conversions = self.conversion_sweep(now, observer);
        }

        if summary != TickSummary::default() {
            debug!(tick = %now, ?summary, "tick processed");
        }
        summary
    }

    fn handle(&mut self, item: &WorkItem) -> Vec<PlacementOutcome> {
        let (world, state, coordinator) = (&mut self.world, &mut self.state, &self.coordinator);
        match *item {
            WorkItem::Placed { pos } => vec![coordinator.handle_placement(world, state, pos)],
            WorkItem::Removed { pos } => coordinator.handle_removal(world, state, pos),
            WorkItem::RegionLoaded { bbox } => coordinator.discover_region(world, state, &bbox),
            WorkItem::JobSiteClaimed { agent } => coordinator.handle_job_site(world, state, agent),
        }
    }

    /// Poll candidates of every convertible profession and convert those
    /// whose storage holds the required item.  Returns the conversion count.
    fn conversion_sweep<O: CoordinationObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let mut converted = 0;
        for (profession, rule) in self.coordinator.convertible() {
            for agent in self.state.candidates.poll_candidates(&self.world, profession) {
                let Some(pos) = self.world.agent(agent).map(|a| a.pos) else {
                    continue;
                };
                if !rule.structure_satisfied(&self.world, pos) {
                    // Still a valid candidate; look again next sweep.
                    self.state.candidates.mark(agent, profession);
                    continue;
                }
                let Some(record) = self.conversions.convert(&mut self.world, agent, rule.derived, rule.item) else {
                    continue;
                };
                self.state.forget(&mut self.world, agent);
                let inherited = self.coordinator.inherit_capabilities(&mut self.world, record.derived);
                if !inherited.is_empty() {
                    debug!(agent = ?record.derived, ?inherited, "capabilities inherited");
                }
                observer.on_conversion(now, &record);
                converted += 1;
            }
        }
        converted
    }
}
