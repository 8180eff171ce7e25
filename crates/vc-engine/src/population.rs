use std::collections::BTreeMap;

use vc_behavior::CoordState;
use vc_core::{Profession, Tick};
use vc_world::World;

/// Live population and coordination bookkeeping at one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub tick:        Tick,
    /// Live villagers per profession (professions with none are absent).
    pub villagers:   BTreeMap<Profession, usize>,
    pub guards:      usize,
    pub units:       usize,
    pub listeners:   usize,
    pub candidates:  usize,
}

impl PopulationCounts {
    pub fn collect<W: World + ?Sized>(tick: Tick, world: &W, state: &CoordState) -> Self {
        let mut counts = PopulationCounts {
            tick,
            units:      state.units.total_units(),
            listeners:  state.listeners.len(),
            candidates: state.candidates.len(),
            ..Default::default()
        };
        for id in world.agent_ids() {
            let Some(agent) = world.agent(id).filter(|a| a.alive) else {
                continue;
            };
            if agent.is_guard() {
                counts.guards += 1;
            } else {
                *counts.villagers.entry(agent.profession).or_default() += 1;
            }
        }
        counts
    }

    pub fn villager_total(&self) -> usize {
        self.villagers.values().sum()
    }
}
