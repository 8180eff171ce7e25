//! Per-profession pairing behavior.
//!
//! Three shapes cover every profession:
//!
//! | Shape           | Chest pairing                        | Crafting pairing          |
//! |-----------------|--------------------------------------|---------------------------|
//! | `StorageWorker` | one unit of its kind                 | unsupported               |
//! | `Artisan`       | storage unit (+ refresh craft unit)  | both units, same targets  |
//! | `Reactive`      | unsupported                          | unsupported               |
//!
//! Both entry points validate their preconditions against the *current* world
//! state first.  Any failure takes the invalidate path: every unit of the
//! agent is removed, its listener detached and its recorded pairing cleared.
//! Once the checks pass, units of kinds this profession does not own (left
//! from an earlier job) are dropped.  Unsupported entry points change nothing.

use tracing::debug;

use vc_core::{AgentId, BlockKind, BlockPos, Item, Profession};
use vc_world::{ChangeListener, World};

use crate::listener::AttachOutcome;
use crate::pairing::{PairingRules, StructureClass};
use crate::{BehaviorUnit, ConversionRule, CoordState, PairingRejection, UnitKind, UnitTargets};

/// Result of a pairing entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairingOutcome {
    /// Units now in place for the agent, plus what happened to its listener.
    Paired { units: Vec<UnitKind>, listener: AttachOutcome },
    /// A precondition failed; the agent's coordination state was torn down.
    Invalidated(PairingRejection),
    /// This behavior does not handle the entry point.  Nothing changed.
    Unsupported,
}

impl PairingOutcome {
    pub fn is_paired(&self) -> bool {
        matches!(self, PairingOutcome::Paired { .. })
    }
}

/// How one profession reacts to pairings.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ProfessionBehavior {
    StorageWorker {
        profession: Profession,
        unit:       UnitKind,
        conversion: Option<ConversionRule>,
    },
    Artisan {
        profession:   Profession,
        storage_unit: UnitKind,
        craft_unit:   UnitKind,
    },
    Reactive {
        profession: Profession,
    },
}

impl ProfessionBehavior {
    /// The behavior of `profession`.  `None` for the unemployed.
    pub fn for_profession(profession: Profession) -> Option<Self> {
        use ProfessionBehavior::*;
        use UnitKind as U;

        let storage = |unit| StorageWorker { profession, unit, conversion: None };
        let converts = |unit, rule| StorageWorker { profession, unit, conversion: Some(rule) };
        Some(match profession {
            Profession::Unemployed   => return None,
            Profession::Farmer       => storage(U::Harvest),
            Profession::Butcher      => converts(U::Distribute, ConversionRule::guard(Item::Axe)),
            Profession::Stonecutter  => storage(U::Craft),
            Profession::Fletcher     => converts(
                U::Craft,
                ConversionRule::guard(Item::Bow).near(BlockKind::TrainingDummy),
            ),
            Profession::Weaponsmith  => converts(U::Repair, ConversionRule::guard(Item::Sword)),
            Profession::Armorer      => storage(U::Repair),
            Profession::Cartographer => storage(U::Explore),
            Profession::Toolsmith | Profession::Cleric => Artisan {
                profession,
                storage_unit: U::Distribute,
                craft_unit:   U::Craft,
            },
            Profession::Librarian    => Reactive { profession },
        })
    }

    /// Professions with a conversion rule, in declaration order.
    pub fn convertible() -> impl Iterator<Item = (Profession, ConversionRule)> {
        Profession::ALL
            .into_iter()
            .filter_map(Self::for_profession)
            .filter_map(|b| b.conversion().map(|rule| (b.profession(), rule)))
    }

    pub fn profession(&self) -> Profession {
        match *self {
            ProfessionBehavior::StorageWorker { profession, .. }
            | ProfessionBehavior::Artisan { profession, .. }
            | ProfessionBehavior::Reactive { profession } => profession,
        }
    }

    pub fn conversion(&self) -> Option<ConversionRule> {
        match *self {
            ProfessionBehavior::StorageWorker { conversion, .. } => conversion,
            _ => None,
        }
    }

    pub fn supports_chest(&self) -> bool {
        !matches!(self, ProfessionBehavior::Reactive { .. })
    }

    pub fn supports_crafting(&self) -> bool {
        matches!(self, ProfessionBehavior::Artisan { .. })
    }

    /// Unit kinds this behavior may own.
    pub fn unit_kinds(&self) -> Vec<UnitKind> {
        match *self {
            ProfessionBehavior::StorageWorker { unit, .. } => vec![unit],
            ProfessionBehavior::Artisan { storage_unit, craft_unit, .. } => vec![storage_unit, craft_unit],
            ProfessionBehavior::Reactive { .. } => Vec::new(),
        }
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// `agent`, working at `job_pos`, was paired with the storage at
    /// `storage_pos`.
    pub fn on_chest_paired<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        agent: AgentId,
        job_pos: BlockPos,
        storage_pos: BlockPos,
    ) -> PairingOutcome {
        let (storage_unit, craft_unit) = match *self {
            ProfessionBehavior::StorageWorker { unit, .. } => (unit, None),
            ProfessionBehavior::Artisan { storage_unit, craft_unit, .. } => (storage_unit, Some(craft_unit)),
            ProfessionBehavior::Reactive { .. } => return PairingOutcome::Unsupported,
        };
        if let Err(reason) = self.check(world, agent, job_pos, storage_pos, None) {
            return self.invalidate(world, state, agent, reason);
        }
        self.drop_foreign_units(world, state, agent);

        // Keep an already-recorded crafting surface if it is still valid, so
        // the sibling craft unit stays consistent with the new storage.
        let crafting = craft_unit.and_then(|_| {
            let recorded = world.agent(agent)?.paired_crafting?;
            check_crafting(&*world, job_pos, recorded).ok().map(|_| recorded)
        });
        let targets = UnitTargets::new(job_pos, storage_pos).with_crafting(crafting);

        let mut units = Vec::with_capacity(2);
        if state.units.upsert(world, agent, storage_unit, targets, BehaviorUnit::new).is_none() {
            return self.invalidate(world, state, agent, PairingRejection::AgentGone);
        }
        units.push(storage_unit);
        if let Some(craft_unit) = craft_unit {
            if crafting.is_some() {
                if let Some(unit) = state.units.get_mut(agent, craft_unit) {
                    unit.retarget(targets);
                    units.push(craft_unit);
                }
            } else {
                state.units.remove(world, agent, craft_unit);
            }
        }
        self.finish(world, state, agent, targets, units)
    }

    /// `agent`, working at `job_pos` with storage at `storage_pos`, was paired
    /// with the crafting surface at `crafting_pos`.
    pub fn on_crafting_table_paired<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        agent: AgentId,
        job_pos: BlockPos,
        storage_pos: BlockPos,
        crafting_pos: BlockPos,
    ) -> PairingOutcome {
        let ProfessionBehavior::Artisan { storage_unit, craft_unit, .. } = *self else {
            return PairingOutcome::Unsupported;
        };
        if let Err(reason) = self.check(world, agent, job_pos, storage_pos, Some(crafting_pos)) {
            return self.invalidate(world, state, agent, reason);
        }
        self.drop_foreign_units(world, state, agent);

        let targets = UnitTargets::new(job_pos, storage_pos).with_crafting(Some(crafting_pos));
        for kind in [storage_unit, craft_unit] {
            if state.units.upsert(world, agent, kind, targets, BehaviorUnit::new).is_none() {
                return self.invalidate(world, state, agent, PairingRejection::AgentGone);
            }
        }
        self.finish(world, state, agent, targets, vec![storage_unit, craft_unit])
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check<W: World + ?Sized>(
        &self,
        world: &W,
        agent: AgentId,
        job_pos: BlockPos,
        storage_pos: BlockPos,
        crafting_pos: Option<BlockPos>,
    ) -> Result<(), PairingRejection> {
        if !world.is_alive(agent) {
            return Err(PairingRejection::AgentGone);
        }
        if world.block_at(job_pos).job_profession() != Some(self.profession()) {
            return Err(PairingRejection::WrongJobBlock(job_pos));
        }
        if !PairingRules::within_pairing_range(job_pos, storage_pos) {
            return Err(PairingRejection::StorageOutOfRange(storage_pos));
        }
        if PairingRules::classify(world.block_at(storage_pos)) != StructureClass::Storage
            || world.inventory_at(storage_pos).is_none()
        {
            return Err(PairingRejection::NotStorage(storage_pos));
        }
        match crafting_pos {
            Some(pos) => check_crafting(world, job_pos, pos),
            None => Ok(()),
        }
    }

    /// Remove units left over from another profession.
    fn drop_foreign_units<W: World + ?Sized>(&self, world: &mut W, state: &mut CoordState, agent: AgentId) {
        let owned = self.unit_kinds();
        let foreign: Vec<UnitKind> = state
            .units
            .units_of(agent)
            .iter()
            .map(BehaviorUnit::kind)
            .filter(|kind| !owned.contains(kind))
            .collect();
        for kind in foreign {
            state.units.remove(world, agent, kind);
        }
    }

    /// Attach the storage listener and record the pairing on the agent.
    fn finish<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        agent: AgentId,
        targets: UnitTargets,
        units: Vec<UnitKind>,
    ) -> PairingOutcome {
        let profession = self.profession();
        let signal = state.units.signal(agent);
        let marker = self.conversion().map(|_| state.candidates.clone());
        let listener = state.listeners.attach(world, agent, targets.storage, move || {
            Box::new(move || {
                signal.raise();
                if let Some(candidates) = &marker {
                    candidates.mark(agent, profession);
                }
            }) as ChangeListener
        });
        if !listener.is_listening() {
            return self.invalidate(world, state, agent, PairingRejection::NotStorage(targets.storage));
        }

        if let Some(a) = world.agent_mut(agent) {
            a.paired_storage = Some(targets.storage);
            a.paired_crafting = targets.crafting;
        }
        if self.conversion().is_some() {
            state.candidates.mark(agent, profession);
        }
        debug!(?agent, %profession, storage = %targets.storage, ?listener, "paired");
        PairingOutcome::Paired { units, listener }
    }

    fn invalidate<W: World + ?Sized>(
        &self,
        world: &mut W,
        state: &mut CoordState,
        agent: AgentId,
        reason: PairingRejection,
    ) -> PairingOutcome {
        let removed = state.forget(world, agent);
        if let Some(a) = world.agent_mut(agent) {
            a.clear_pairing();
        }
        debug!(?agent, profession = %self.profession(), %reason, removed, "pairing invalidated");
        PairingOutcome::Invalidated(reason)
    }
}

fn check_crafting<W: World + ?Sized>(world: &W, job_pos: BlockPos, crafting_pos: BlockPos) -> Result<(), PairingRejection> {
    if PairingRules::classify(world.block_at(crafting_pos)) != StructureClass::CraftingSurface {
        return Err(PairingRejection::NotCraftingSurface(crafting_pos));
    }
    if !PairingRules::within_pairing_range(job_pos, crafting_pos) {
        return Err(PairingRejection::CraftingOutOfRange(crafting_pos));
    }
    Ok(())
}
