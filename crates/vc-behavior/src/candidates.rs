//! `ConversionCandidateIndex` — agents that may be ready to convert, keyed by
//! profession.
//!
//! Marking is cheap and idempotent: it happens from storage listeners (deep
//! inside the world's inventory mutation) and from successful pairings.  The
//! expensive part (checking the storage, extracting the item) is deferred to
//! the engine's periodic sweep, which drains the index via
//! [`poll_candidates`](ConversionCandidateIndex::poll_candidates).
//!
//! The index is a cheap-to-clone handle over shared state so a storage
//! listener closure can carry one.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use vc_core::{AgentId, Profession};
use vc_world::SpatialWorldQuery;

#[derive(Clone, Debug, Default)]
pub struct ConversionCandidateIndex {
    /// Profession recorded at marking time.  One entry per agent.
    queued: Rc<RefCell<BTreeMap<AgentId, Profession>>>,
}

impl ConversionCandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `agent` under `profession`.  Returns `true` if the agent was not
    /// already queued under that profession.
    pub fn mark(&self, agent: AgentId, profession: Profession) -> bool {
        self.queued.borrow_mut().insert(agent, profession) != Some(profession)
    }

    /// Queue `agent` under its current profession.  Dead or absent agents are
    /// ignored.
    pub fn mark_candidate<W: SpatialWorldQuery + ?Sized>(&self, world: &W, agent: AgentId) -> bool {
        match world.agent(agent) {
            Some(a) if a.alive => self.mark(agent, a.profession),
            _ => false,
        }
    }

    /// Drain every agent queued under `profession` and return those still
    /// alive and still holding that profession, ascending by id.
    ///
    /// Stale entries are dropped, not re-queued.
    pub fn poll_candidates<W: SpatialWorldQuery + ?Sized>(&self, world: &W, profession: Profession) -> Vec<AgentId> {
        let mut queued = self.queued.borrow_mut();
        let drained: Vec<AgentId> = queued
            .iter()
            .filter(|(_, p)| **p == profession)
            .map(|(&id, _)| id)
            .collect();
        for id in &drained {
            queued.remove(id);
        }
        drained
            .into_iter()
            .filter(|&id| world.agent(id).is_some_and(|a| a.alive && a.profession == profession))
            .collect()
    }

    /// Drop entries for agents that are gone or dead.  Returns how many.
    pub fn prune_dead<W: SpatialWorldQuery + ?Sized>(&self, world: &W) -> usize {
        let mut queued = self.queued.borrow_mut();
        let before = queued.len();
        queued.retain(|&id, _| world.is_alive(id));
        before - queued.len()
    }

    pub fn forget(&self, agent: AgentId) -> bool {
        self.queued.borrow_mut().remove(&agent).is_some()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.queued.borrow().contains_key(&agent)
    }

    pub fn len(&self) -> usize {
        self.queued.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.borrow().is_empty()
    }
}
