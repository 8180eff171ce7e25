//! Behavior units — the per-agent, per-kind work routines the coordination
//! layer decides to exist.
//!
//! Running a unit is the world's job (its goal selector picks by priority).
//! What lives here is the part coordination owns: which positions the unit
//! targets, and when it next wants to run.
//!
//! # Re-check signalling
//!
//! Every agent with units has one [`ChangeSignal`], a shared generation
//! counter.  The storage listener bumps it; each unit remembers the last
//! generation it saw.  [`BehaviorUnit::poll_ready`] treats a moved counter as
//! "run now", which cuts a pending cooldown short.

use std::cell::Cell;
use std::rc::Rc;

use vc_core::{BlockPos, Tick, UnitId};

// ── UnitKind ──────────────────────────────────────────────────────────────────

/// The kinds of work routine a profession can own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum UnitKind {
    /// Move goods between storage and the agent's surroundings.
    Distribute,
    /// Wander to chart nearby terrain, restocking from storage.
    Explore,
    /// Tend crops and deposit the yield.
    Harvest,
    /// Turn stored inputs into outputs at the job site.
    Craft,
    /// Mend equipment from stored materials.
    Repair,
}

impl UnitKind {
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Distribute,
        UnitKind::Explore,
        UnitKind::Harvest,
        UnitKind::Craft,
        UnitKind::Repair,
    ];

    /// Goal-selector priority.  Lower runs first.
    pub const fn priority(self) -> u8 {
        match self {
            UnitKind::Distribute => 2,
            UnitKind::Explore    => 2,
            UnitKind::Harvest    => 3,
            UnitKind::Craft      => 4,
            UnitKind::Repair     => 5,
        }
    }

    /// Idle ticks between two runs when nothing signals a change.
    pub const fn cooldown_ticks(self) -> u64 {
        match self {
            UnitKind::Distribute => 100,
            UnitKind::Explore    => 200,
            UnitKind::Harvest    => 40,
            UnitKind::Craft      => 60,
            UnitKind::Repair     => 80,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Distribute => "distribute",
            UnitKind::Explore    => "explore",
            UnitKind::Harvest    => "harvest",
            UnitKind::Craft      => "craft",
            UnitKind::Repair     => "repair",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── UnitTargets ───────────────────────────────────────────────────────────────

/// Positions a unit works against.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UnitTargets {
    pub job_site: BlockPos,
    pub storage:  BlockPos,
    pub crafting: Option<BlockPos>,
}

impl UnitTargets {
    pub fn new(job_site: BlockPos, storage: BlockPos) -> Self {
        Self { job_site, storage, crafting: None }
    }

    pub fn with_crafting(mut self, crafting: Option<BlockPos>) -> Self {
        self.crafting = crafting;
        self
    }

    /// `true` if any target equals `pos`.
    pub fn references(&self, pos: BlockPos) -> bool {
        self.job_site == pos || self.storage == pos || self.crafting == Some(pos)
    }
}

// ── ChangeSignal ──────────────────────────────────────────────────────────────

/// Shared per-agent change counter.
///
/// Cloning shares the counter.  Single-threaded by construction (`Rc`), like
/// the listener closures that raise it.
#[derive(Clone, Debug, Default)]
pub struct ChangeSignal(Rc<Cell<u64>>);

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one change.
    #[inline]
    pub fn raise(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.0.get()
    }
}

// ── BehaviorUnit ──────────────────────────────────────────────────────────────

/// One registered work routine of one agent.
#[derive(Debug)]
pub struct BehaviorUnit {
    id:              UnitId,
    kind:            UnitKind,
    targets:         UnitTargets,
    signal:          ChangeSignal,
    seen_generation: u64,
    next_run:        Tick,
    runs:            u32,
}

impl BehaviorUnit {
    /// A unit ready to run immediately.  Matches the factory signature
    /// expected by [`BehaviorUnitRegistry::upsert`][crate::BehaviorUnitRegistry::upsert].
    pub fn new(id: UnitId, kind: UnitKind, targets: UnitTargets, signal: ChangeSignal) -> Self {
        let seen_generation = signal.generation();
        Self { id, kind, targets, signal, seen_generation, next_run: Tick::ZERO, runs: 0 }
    }

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    #[inline]
    pub fn targets(&self) -> &UnitTargets {
        &self.targets
    }

    /// Number of completed runs.
    #[inline]
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Replace the targets.  Returns `true` if anything changed.
    pub fn retarget(&mut self, targets: UnitTargets) -> bool {
        let changed = self.targets != targets;
        self.targets = targets;
        changed
    }

    /// `true` if the agent's signal moved since this unit last looked.
    pub fn recheck_pending(&self) -> bool {
        self.signal.generation() != self.seen_generation
    }

    /// Whether the unit wants to run at `now`.
    ///
    /// A pending change signal is consumed here and makes the unit ready
    /// regardless of cooldown.
    pub fn poll_ready(&mut self, now: Tick) -> bool {
        let generation = self.signal.generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.next_run = now;
        }
        now >= self.next_run
    }

    /// Record a finished run at `now` and start the cooldown.
    pub fn complete_run(&mut self, now: Tick) {
        self.runs += 1;
        self.next_run = now + self.kind.cooldown_ticks();
    }

    #[inline]
    pub fn next_run(&self) -> Tick {
        self.next_run
    }
}
