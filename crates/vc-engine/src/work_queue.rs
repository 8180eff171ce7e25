//! `WorkQueue` — world-mutating coordination work deferred to the engine's
//! next tick.
//!
//! World callbacks only ever push.  The engine drains everything due at the
//! start of its tick, in arrival order, so the handling of an event never
//! runs inside the callback that reported it.  Items pushed while a drain is
//! in progress are not part of that drain.

use std::collections::BTreeMap;

use vc_core::{AgentId, BlockBox, BlockPos, Tick};

/// One deferred unit of coordination work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkItem {
    /// A block was placed.  The block is re-read when the item is handled.
    Placed { pos: BlockPos },
    /// A block was removed or replaced.
    Removed { pos: BlockPos },
    /// A region became available; every structure in it counts as placed.
    RegionLoaded { bbox: BlockBox },
    /// An agent acquired (or changed) its job site.
    JobSiteClaimed { agent: AgentId },
}

/// Tick-keyed FIFO of [`WorkItem`]s.
#[derive(Default)]
pub struct WorkQueue {
    inner: BTreeMap<Tick, Vec<WorkItem>>,
    total: usize,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `item` for the tick `due`.
    pub fn push(&mut self, due: Tick, item: WorkItem) {
        self.inner.entry(due).or_default().push(item);
        self.total += 1;
    }

    /// Remove and return every item due at or before `now`, oldest tick
    /// first and in push order within a tick.
    pub fn drain_due(&mut self, now: Tick) -> Vec<WorkItem> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let items: Vec<WorkItem> = due.into_values().flatten().collect();
        self.total -= items.len();
        items
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
