//! `BehaviorUnitRegistry` — the index of every unit the coordination layer
//! has created.
//!
//! # Uniqueness
//!
//! An agent holds at most one unit per [`UnitKind`].  [`upsert`] retargets an
//! existing unit in place and only enrols a unit with the world's goal
//! scheduler on creation, so repeated pairings never stack duplicate goals.
//!
//! # Signals
//!
//! Each agent entry also owns the agent's [`ChangeSignal`].  The entry (and
//! with it the signal) survives single-unit removal and is dropped only by
//! [`remove_all`], which every invalidation path pairs with detaching the
//! agent's storage listener.  A listener therefore never outlives the signal
//! it raises.
//!
//! [`upsert`]: BehaviorUnitRegistry::upsert
//! [`remove_all`]: BehaviorUnitRegistry::remove_all

use rustc_hash::FxHashMap;
use tracing::debug;

use vc_core::{AgentId, BlockPos, Tick, UnitId};
use vc_world::GoalScheduler;

use crate::{BehaviorUnit, ChangeSignal, UnitKind, UnitTargets};

#[derive(Debug, Default)]
struct AgentUnits {
    signal: ChangeSignal,
    /// Sorted by priority, then kind.
    units:  Vec<BehaviorUnit>,
}

impl AgentUnits {
    fn find(&self, kind: UnitKind) -> Option<usize> {
        self.units.iter().position(|u| u.kind() == kind)
    }
}

/// Per-agent behavior units, unique per kind.
#[derive(Debug)]
pub struct BehaviorUnitRegistry {
    agents:    FxHashMap<AgentId, AgentUnits>,
    next_unit: UnitId,
}

impl BehaviorUnitRegistry {
    pub fn new() -> Self {
        Self { agents: FxHashMap::default(), next_unit: UnitId(0) }
    }

    /// Ensure `agent` has exactly one unit of `kind` targeting `targets`.
    ///
    /// An existing unit is retargeted and keeps its id.  Otherwise `factory`
    /// builds a fresh unit, which is registered with the scheduler at the
    /// kind's priority.  Returns `None` if the scheduler refused the
    /// registration (agent gone); nothing is recorded in that case.
    pub fn upsert<W, F>(
        &mut self,
        world: &mut W,
        agent: AgentId,
        kind: UnitKind,
        targets: UnitTargets,
        factory: F,
    ) -> Option<UnitId>
    where
        W: GoalScheduler + ?Sized,
        F: FnOnce(UnitId, UnitKind, UnitTargets, ChangeSignal) -> BehaviorUnit,
    {
        let entry = self.agents.entry(agent).or_default();
        if let Some(idx) = entry.find(kind) {
            let unit = &mut entry.units[idx];
            if unit.retarget(targets) {
                debug!(?agent, %kind, unit = %unit.id(), "unit retargeted");
            }
            return Some(unit.id());
        }

        let id = self.next_unit;
        if !world.register_goal(agent, kind.priority(), id) {
            if entry.units.is_empty() {
                self.agents.remove(&agent);
            }
            return None;
        }
        self.next_unit = id.next();
        let unit = factory(id, kind, targets, entry.signal.clone());
        debug_assert_eq!(unit.kind(), kind, "factory built a unit of the wrong kind");
        debug!(?agent, %kind, unit = %id, "unit registered");
        entry.units.push(unit);
        entry.units.sort_by_key(|u| (u.kind().priority(), u.kind()));
        Some(id)
    }

    /// Remove `agent`'s unit of `kind`, unregistering it from the scheduler.
    pub fn remove<W: GoalScheduler + ?Sized>(&mut self, world: &mut W, agent: AgentId, kind: UnitKind) -> bool {
        let Some(entry) = self.agents.get_mut(&agent) else {
            return false;
        };
        let Some(idx) = entry.find(kind) else {
            return false;
        };
        let unit = entry.units.remove(idx);
        world.unregister_goal(agent, unit.id());
        debug!(?agent, %kind, unit = %unit.id(), "unit removed");
        true
    }

    /// Remove every unit of `agent` and drop its signal.  Returns the number
    /// of units removed.
    pub fn remove_all<W: GoalScheduler + ?Sized>(&mut self, world: &mut W, agent: AgentId) -> usize {
        let Some(entry) = self.agents.remove(&agent) else {
            return 0;
        };
        for unit in &entry.units {
            world.unregister_goal(agent, unit.id());
        }
        entry.units.len()
    }

    /// The agent's change signal, creating the agent entry if needed.
    pub fn signal(&mut self, agent: AgentId) -> ChangeSignal {
        self.agents.entry(agent).or_default().signal.clone()
    }

    pub fn get(&self, agent: AgentId, kind: UnitKind) -> Option<&BehaviorUnit> {
        let entry = self.agents.get(&agent)?;
        entry.find(kind).map(|idx| &entry.units[idx])
    }

    pub fn get_mut(&mut self, agent: AgentId, kind: UnitKind) -> Option<&mut BehaviorUnit> {
        let entry = self.agents.get_mut(&agent)?;
        let idx = entry.find(kind)?;
        Some(&mut entry.units[idx])
    }

    /// Units of `agent` in priority order.
    pub fn units_of(&self, agent: AgentId) -> &[BehaviorUnit] {
        self.agents.get(&agent).map_or(&[], |e| e.units.as_slice())
    }

    /// Ids of `agent`'s units that want to run at `now`, in priority order.
    /// Consumes any pending change signal.
    pub fn ready_units(&mut self, agent: AgentId, now: Tick) -> Vec<UnitId> {
        let Some(entry) = self.agents.get_mut(&agent) else {
            return Vec::new();
        };
        entry
            .units
            .iter_mut()
            .filter_map(|u| u.poll_ready(now).then_some(u.id()))
            .collect()
    }

    /// Agents holding a unit that targets `pos`, ascending by id.
    pub fn agents_targeting(&self, pos: BlockPos) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, e)| e.units.iter().any(|u| u.targets().references(pos)))
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Agents with an entry (units or a live signal), ascending by id.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.agents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn unit_count(&self, agent: AgentId) -> usize {
        self.units_of(agent).len()
    }

    /// Units across all agents.
    pub fn total_units(&self) -> usize {
        self.agents.values().map(|e| e.units.len()).sum()
    }

    pub fn contains_agent(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }
}

impl Default for BehaviorUnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
