//! Per-agent goal selector: the agent's own decision loop.
//!
//! The coordination layer only registers and unregisters units here; running
//! them (pathfinding, animations) is the world's business.

use vc_core::UnitId;

/// One registered unit and the priority it runs at (lower runs first).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GoalEntry {
    pub priority: u8,
    pub unit:     UnitId,
}

/// Ordered set of goals for a single agent.
///
/// Entries are kept sorted by priority; equal priorities keep insertion
/// order.  The selector never drops an entry on its own.
#[derive(Clone, Debug, Default)]
pub struct GoalSelector {
    entries: Vec<GoalEntry>,
}

impl GoalSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `unit` at `priority`.  Returns `false` if it is already present.
    pub fn add(&mut self, priority: u8, unit: UnitId) -> bool {
        if self.contains(unit) {
            return false;
        }
        let at = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(at, GoalEntry { priority, unit });
        true
    }

    /// Unregister `unit`.  Returns `false` if it was not present.
    pub fn remove(&mut self, unit: UnitId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.unit != unit);
        self.entries.len() != before
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.entries.iter().any(|e| e.unit == unit)
    }

    /// Entries in run order.
    pub fn entries(&self) -> &[GoalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
