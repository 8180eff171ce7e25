use tracing::debug;

use vc_core::AgentId;
use vc_world::World;

use crate::{BehaviorUnitRegistry, ConversionCandidateIndex, StorageChangeListenerManager};

/// The coordination layer's registries, passed together into every pairing
/// entry point.
#[derive(Debug, Default)]
pub struct CoordState {
    pub units:      BehaviorUnitRegistry,
    pub listeners:  StorageChangeListenerManager,
    pub candidates: ConversionCandidateIndex,
}

impl CoordState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded for `agent`: units (unregistered from the
    /// scheduler), its storage listener, and any candidate entry.
    ///
    /// Returns the number of units removed.
    pub fn forget<W: World + ?Sized>(&mut self, world: &mut W, agent: AgentId) -> usize {
        let removed = self.units.remove_all(world, agent);
        self.listeners.detach(world, agent);
        self.candidates.forget(agent);
        removed
    }

    /// Forget every agent that is no longer present and alive.  Returns the
    /// swept ids in ascending order.
    pub fn sweep_dead<W: World + ?Sized>(&mut self, world: &mut W) -> Vec<AgentId> {
        let mut tracked = self.units.agents();
        tracked.extend(self.listeners.agents());
        tracked.sort_unstable();
        tracked.dedup();

        let dead: Vec<AgentId> = tracked.into_iter().filter(|&id| !world.is_alive(id)).collect();
        for &agent in &dead {
            let units = self.forget(world, agent);
            debug!(?agent, units, "dead agent swept");
        }
        self.candidates.prune_dead(world);
        dead
    }

    /// `true` if nothing is recorded for `agent`.
    pub fn is_clean(&self, agent: AgentId) -> bool {
        !self.units.contains_agent(agent) && self.listeners.registration(agent).is_none()
    }
}
