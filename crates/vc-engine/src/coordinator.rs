//! `JobBlockPairingCoordinator` — turns structure events into calls on the
//! right [`ProfessionBehavior`] for the right agent.
//!
//! # Dispatch
//!
//! | Placed structure  | Action                                                   |
//! |-------------------|----------------------------------------------------------|
//! | storage           | nearest worker whose job site is in pairing range → `on_chest_paired`, then `on_crafting_table_paired` if an artisan has a crafting surface standing by |
//! | crafting surface  | nearest crafting-capable worker → `on_crafting_table_paired` with its storage |
//! | modifier block    | set the capability on every guard within range           |
//! | banner            | nearest guard in discovery range adopts it as rally point |
//! | anything else     | ignored                                                  |
//!
//! "Nearest" is by squared distance from the worker's job site to the
//! structure, then from the worker itself, then by id.
//!
//! The behavior used for a worker is the one belonging to the job block
//! currently standing at its job site, so a worker that has claimed a site
//! but not yet taken the profession is still paired.

use std::collections::BTreeMap;

use tracing::{debug, info};

use vc_behavior::{
    CHEST_PAIRING_DISTANCE, ConversionRule, CoordState, JOB_BLOCK_DISCOVERY_DISTANCE,
    MODIFIER_DISTANCE, PairingOutcome, PairingRejection, PairingRules, ProfessionBehavior,
    StructureClass,
};
use vc_core::{AgentId, BlockBox, BlockPos, Capability, Profession};
use vc_world::{Agent, World};

/// What handling one structure (or one agent) produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Unclassified block, air, or a bare job block.
    Ignored,
    /// A pairable structure with no eligible worker in range.
    NoAgentInRange { pos: BlockPos },
    ChestPaired { agent: AgentId, outcome: PairingOutcome },
    CraftingPaired { agent: AgentId, outcome: PairingOutcome },
    /// A crafting-capable worker was found but has no storage to pair with.
    AwaitingStorage { agent: AgentId },
    /// `flagged` lists guards that did not have `capability` before.
    ModifierApplied { capability: Capability, flagged: Vec<AgentId> },
    RallyPointSet { guard: AgentId, pos: BlockPos },
    /// An existing pairing was re-checked against the current world.
    Revalidated { agent: AgentId, outcome: PairingOutcome },
}

/// Routes structure events to profession behaviors.
pub struct JobBlockPairingCoordinator {
    behaviors: BTreeMap<Profession, ProfessionBehavior>,
}

impl JobBlockPairingCoordinator {
    /// Coordinator with the stock behavior for every profession.
    pub fn new() -> Self {
        let behaviors = Profession::ALL
            .into_iter()
            .filter_map(|p| ProfessionBehavior::for_profession(p).map(|b| (p, b)))
            .collect();
        Self { behaviors }
    }

    /// Replace the behavior registered for `profession`.
    pub fn set_behavior(&mut self, profession: Profession, behavior: ProfessionBehavior) {
        self.behaviors.insert(profession, behavior);
    }

    pub fn behavior(&self, profession: Profession) -> Option<&ProfessionBehavior> {
        self.behaviors.get(&profession)
    }

    /// Professions with a conversion rule, ascending.
    pub fn convertible(&self) -> Vec<(Profession, ConversionRule)> {
        self.behaviors
            .iter()
            .filter_map(|(&p, b)| b.conversion().map(|rule| (p, rule)))
            .collect()
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Handle a structure that now stands at `pos`.
    pub fn handle_placement<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        pos: BlockPos,
    ) -> PlacementOutcome {
        let outcome = match PairingRules::classify(world.block_at(pos)) {
            StructureClass::Storage => self.pair_storage(world, state, pos),
            StructureClass::CraftingSurface => self.pair_crafting(world, state, pos),
            StructureClass::Modifier(cap) => apply_modifier(world, pos, cap),
            StructureClass::Banner => pair_banner(world, pos),
            StructureClass::JobBlock(_) | StructureClass::Unclassified => PlacementOutcome::Ignored,
        };
        debug!(%pos, ?outcome, "placement handled");
        outcome
    }

    /// A crafting-capable worker with no crafting surface on record also
    /// picks up the nearest one already standing by its job site; the
    /// returned outcome then covers both units.
    fn pair_storage<W: World + ?Sized>(&self, world: &mut W, state: &mut CoordState, pos: BlockPos) -> PlacementOutcome {
        let Some((agent, job, behavior)) = self.nearest_worker(world, pos, |b| b.supports_chest()) else {
            return PlacementOutcome::NoAgentInRange { pos };
        };
        let mut outcome = behavior.on_chest_paired(world, state, agent, job, pos);
        let unrecorded = world.agent(agent).is_some_and(|a| a.paired_crafting.is_none());
        if outcome.is_paired() && behavior.supports_crafting() && unrecorded {
            if let Some(crafting) = nearest_of_class(&*world, job, StructureClass::CraftingSurface) {
                outcome = behavior.on_crafting_table_paired(world, state, agent, job, pos, crafting);
            }
        }
        PlacementOutcome::ChestPaired { agent, outcome }
    }

    fn pair_crafting<W: World + ?Sized>(&self, world: &mut W, state: &mut CoordState, pos: BlockPos) -> PlacementOutcome {
        let Some((agent, job, behavior)) = self.nearest_worker(world, pos, |b| b.supports_crafting()) else {
            return PlacementOutcome::NoAgentInRange { pos };
        };
        let recorded = world.agent(agent).and_then(|a| a.paired_storage);
        let Some(storage) = recorded.or_else(|| nearest_storage(&*world, job)) else {
            return PlacementOutcome::AwaitingStorage { agent };
        };
        let outcome = behavior.on_crafting_table_paired(world, state, agent, job, storage, pos);
        PlacementOutcome::CraftingPaired { agent, outcome }
    }

    /// Nearest live villager whose job site lies within pairing range of
    /// `pos` and whose job-site behavior passes `wants`.
    ///
    /// Candidates are the holders of job blocks around `pos`, wherever they
    /// stand, plus villagers standing nearby.
    fn nearest_worker<W: World + ?Sized>(
        &self,
        world: &W,
        pos: BlockPos,
        wants: impl Fn(&ProfessionBehavior) -> bool,
    ) -> Option<(AgentId, BlockPos, ProfessionBehavior)> {
        let job_radius = PairingRules::search_radius(CHEST_PAIRING_DISTANCE);
        let mut candidates: Vec<AgentId> = world
            .blocks_in_box(&BlockBox::around(pos, job_radius))
            .into_iter()
            .filter(|&(_, kind)| matches!(PairingRules::classify(kind), StructureClass::JobBlock(_)))
            .filter_map(|(job, _)| world.claim_holder(job))
            .collect();
        let radius = PairingRules::search_radius(JOB_BLOCK_DISCOVERY_DISTANCE);
        candidates.extend(world.entities_in_box(&BlockBox::around(pos, radius), &|a: &Agent| a.is_villager()));
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .filter_map(|id| {
                let agent = world.agent(id).filter(|a| a.alive && a.is_villager())?;
                let job = agent.job_site.filter(|&job| PairingRules::within_pairing_range(job, pos))?;
                let behavior = self.behavior_at(world, job)?;
                wants(&behavior).then_some((id, job, behavior, agent.pos))
            })
            .min_by_key(|&(id, job, _, at)| (job.distance_sq(pos), at.distance_sq(pos), id))
            .map(|(id, job, behavior, _)| (id, job, behavior))
    }

    fn behavior_at<W: World + ?Sized>(&self, world: &W, job: BlockPos) -> Option<ProfessionBehavior> {
        let profession = world.block_at(job).job_profession()?;
        self.behaviors.get(&profession).copied()
    }

    // ── Removal and re-validation ─────────────────────────────────────────

    /// Re-check every agent whose pairing involved `pos` (or a storage
    /// touching it, for double chests).
    pub fn handle_removal<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        pos: BlockPos,
    ) -> Vec<PlacementOutcome> {
        let mut affected = state.units.agents_targeting(pos);
        affected.extend(state.listeners.agents_listening_near(pos));
        affected.sort_unstable();
        affected.dedup();

        affected
            .into_iter()
            .map(|agent| PlacementOutcome::Revalidated { agent, outcome: self.revalidate(world, state, agent) })
            .collect()
    }

    /// Re-run the pairing entry point matching `agent`'s recorded pairing.
    pub fn revalidate<W: World + ?Sized>(&self, world: &mut W, state: &mut CoordState, agent: AgentId) -> PairingOutcome {
        let recorded_job = state.units.units_of(agent).first().map(|u| u.targets().job_site);
        let Some(snapshot) = world.agent(agent).filter(|a| a.alive).cloned() else {
            state.forget(world, agent);
            return PairingOutcome::Invalidated(PairingRejection::AgentGone);
        };
        let Some(job) = snapshot.job_site.or(recorded_job) else {
            return PairingOutcome::Unsupported;
        };
        let behavior = self
            .behavior_at(world, job)
            .or_else(|| self.behaviors.get(&snapshot.profession).copied());
        let Some(behavior) = behavior else {
            forget_pairing(world, state, agent);
            return PairingOutcome::Invalidated(PairingRejection::WrongJobBlock(job));
        };
        let storage = snapshot
            .paired_storage
            .or_else(|| state.units.units_of(agent).first().map(|u| u.targets().storage));
        let Some(storage) = storage else {
            return PairingOutcome::Unsupported;
        };

        let crafting = snapshot
            .paired_crafting
            .filter(|&c| PairingRules::classify(world.block_at(c)) == StructureClass::CraftingSurface);
        match crafting {
            Some(crafting) if behavior.supports_crafting() => {
                behavior.on_crafting_table_paired(world, state, agent, job, storage, crafting)
            }
            _ => behavior.on_chest_paired(world, state, agent, job, storage),
        }
    }

    // ── Job-site arrival ──────────────────────────────────────────────────

    /// `agent` just claimed its job site: pair it with the nearest storage
    /// and crafting surface around the site.
    ///
    /// Whatever the agent held for a different site, or for a profession
    /// that pairs with nothing, is torn down first.
    pub fn handle_job_site<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        agent: AgentId,
    ) -> Vec<PlacementOutcome> {
        let Some(job) = world.agent(agent).filter(|a| a.alive).and_then(|a| a.job_site) else {
            return Vec::new();
        };
        let behavior = self.behavior_at(world, job).filter(ProfessionBehavior::supports_chest);
        let moved = state.units.units_of(agent).iter().any(|u| u.targets().job_site != job);
        if (moved || behavior.is_none()) && !state.is_clean(agent) {
            forget_pairing(world, state, agent);
        }
        let Some(behavior) = behavior else {
            return Vec::new();
        };

        let Some(storage) = nearest_storage(world, job) else {
            if !state.is_clean(agent) {
                forget_pairing(world, state, agent);
            }
            return vec![PlacementOutcome::NoAgentInRange { pos: job }];
        };

        let outcome = behavior.on_chest_paired(world, state, agent, job, storage);
        let mut outcomes = vec![PlacementOutcome::ChestPaired { agent, outcome }];
        if behavior.supports_crafting() {
            if let Some(crafting) = nearest_of_class(world, job, StructureClass::CraftingSurface) {
                let outcome = behavior.on_crafting_table_paired(world, state, agent, job, storage, crafting);
                outcomes.push(PlacementOutcome::CraftingPaired { agent, outcome });
            }
        }
        outcomes
    }

    // ── Region discovery ──────────────────────────────────────────────────

    /// Treat every structure inside `bbox` as freshly placed.  Storages are
    /// handled before everything else so crafting pairings find them.
    pub fn discover_region<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        bbox: &BlockBox,
    ) -> Vec<PlacementOutcome> {
        let (storages, others): (Vec<_>, Vec<_>) = world
            .blocks_in_box(bbox)
            .into_iter()
            .filter(|&(_, kind)| {
                !matches!(PairingRules::classify(kind), StructureClass::JobBlock(_) | StructureClass::Unclassified)
            })
            .partition(|&(_, kind)| PairingRules::classify(kind) == StructureClass::Storage);

        storages
            .into_iter()
            .chain(others)
            .map(|(pos, _)| self.handle_placement(world, state, pos))
            .collect()
    }

    // ── Converted agents ──────────────────────────────────────────────────

    /// Give a fresh guard the capabilities of modifier blocks already in
    /// range.  Returns the capabilities newly set.
    pub fn inherit_capabilities<W: World + ?Sized>(&self, world: &mut W, guard: AgentId) -> Vec<Capability> {
        let Some(pos) = world.agent(guard).map(|a| a.pos) else {
            return Vec::new();
        };
        let radius = PairingRules::search_radius(MODIFIER_DISTANCE);
        let caps: Vec<Capability> = world
            .blocks_in_box(&BlockBox::around(pos, radius))
            .into_iter()
            .filter(|&(at, _)| pos.within(at, MODIFIER_DISTANCE))
            .filter_map(|(_, kind)| kind.modifier_capability())
            .collect();
        let Some(agent) = world.agent_mut(guard) else {
            return Vec::new();
        };
        let mut gained: Vec<Capability> = caps.into_iter().filter(|&cap| agent.capabilities.insert(cap)).collect();
        gained.sort_unstable();
        gained
    }
}

impl Default for JobBlockPairingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Non-profession pairings ───────────────────────────────────────────────────

fn apply_modifier<W: World + ?Sized>(world: &mut W, pos: BlockPos, capability: Capability) -> PlacementOutcome {
    let radius = PairingRules::search_radius(MODIFIER_DISTANCE);
    let guards = world.entities_in_box(&BlockBox::around(pos, radius), &|a: &Agent| {
        a.alive && a.is_guard() && a.pos.within(pos, MODIFIER_DISTANCE)
    });
    let mut flagged = Vec::new();
    for id in guards {
        if let Some(guard) = world.agent_mut(id) {
            if guard.capabilities.insert(capability) {
                flagged.push(id);
            }
        }
    }
    if !flagged.is_empty() {
        info!(%pos, ?capability, guards = flagged.len(), "modifier applied");
    }
    PlacementOutcome::ModifierApplied { capability, flagged }
}

fn pair_banner<W: World + ?Sized>(world: &mut W, pos: BlockPos) -> PlacementOutcome {
    let radius = PairingRules::search_radius(JOB_BLOCK_DISCOVERY_DISTANCE);
    let guards = world.entities_in_box(&BlockBox::around(pos, radius), &|a: &Agent| {
        a.alive && a.is_guard() && a.pos.within(pos, JOB_BLOCK_DISCOVERY_DISTANCE)
    });
    let nearest = guards
        .into_iter()
        .filter_map(|id| world.agent(id).map(|a| (a.pos.distance_sq(pos), id)))
        .min();
    let Some((_, guard)) = nearest else {
        return PlacementOutcome::NoAgentInRange { pos };
    };
    if let Some(agent) = world.agent_mut(guard) {
        agent.rally_point = Some(pos);
    }
    PlacementOutcome::RallyPointSet { guard, pos }
}

/// Drop every unit, listener and candidate entry of `agent` and clear the
/// pairing recorded on it.
fn forget_pairing<W: World + ?Sized>(world: &mut W, state: &mut CoordState, agent: AgentId) {
    state.forget(world, agent);
    if let Some(a) = world.agent_mut(agent) {
        a.clear_pairing();
    }
}

// ── Structure search ──────────────────────────────────────────────────────────

/// Nearest structure of `class` within pairing range of `job`, ties broken by
/// position order.
fn nearest_of_class<W: World + ?Sized>(world: &W, job: BlockPos, class: StructureClass) -> Option<BlockPos> {
    let radius = PairingRules::search_radius(CHEST_PAIRING_DISTANCE);
    world
        .blocks_in_box(&BlockBox::around(job, radius))
        .into_iter()
        .filter(|&(pos, kind)| PairingRules::classify(kind) == class && PairingRules::within_pairing_range(job, pos))
        .min_by_key(|&(pos, _)| (job.distance_sq(pos), pos))
        .map(|(pos, _)| pos)
}

fn nearest_storage<W: World + ?Sized>(world: &W, job: BlockPos) -> Option<BlockPos> {
    nearest_of_class(world, job, StructureClass::Storage)
}
