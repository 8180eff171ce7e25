//! Agent conversion: a villager consumes one item from its paired storage and
//! is replaced by an agent of a derived kind.
//!
//! # Atomicity
//!
//! Everything that can fail is checked before the world is mutated.  The
//! item is extracted all-or-nothing; only after that succeeds is the derived
//! agent spawned and the source's claims released and the source discarded.
//! A failed extraction leaves the world untouched.

use tracing::{debug, info};

use vc_core::{AgentId, AgentKind, Biome, BlockBox, BlockKind, BlockPos, Item, PositionRng, Profession};
use vc_world::{Agent, Equipment, World};

use crate::MODIFIER_DISTANCE;
use crate::pairing::PairingRules;

// ── ConversionRule ────────────────────────────────────────────────────────────

/// When and into what a profession converts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ConversionRule {
    pub derived: AgentKind,
    /// One of these is consumed from the paired storage.
    pub item:    Item,
    /// Structure that must stand within [`MODIFIER_DISTANCE`] of the agent.
    pub near:    Option<BlockKind>,
}

impl ConversionRule {
    pub const fn guard(item: Item) -> Self {
        Self { derived: AgentKind::Guard, item, near: None }
    }

    pub const fn near(mut self, structure: BlockKind) -> Self {
        self.near = Some(structure);
        self
    }

    /// `true` if the structural requirement (if any) holds around `pos`.
    pub fn structure_satisfied<W: World + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        let Some(structure) = self.near else {
            return true;
        };
        let radius = PairingRules::search_radius(MODIFIER_DISTANCE);
        world
            .blocks_in_box(&BlockBox::around(pos, radius))
            .into_iter()
            .any(|(at, kind)| kind == structure && pos.within(at, MODIFIER_DISTANCE))
    }
}

// ── ConversionRecord ──────────────────────────────────────────────────────────

/// One completed conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRecord {
    pub source:     AgentId,
    pub derived:    AgentId,
    pub kind:       AgentKind,
    pub profession: Profession,
    pub item:       Item,
    pub pos:        BlockPos,
    pub variant:    u8,
}

// ── Variant palette ───────────────────────────────────────────────────────────

fn palette(biome: Biome) -> &'static [u8] {
    match biome {
        Biome::Plains  => &[0, 1],
        Biome::Desert  => &[2],
        Biome::Savanna => &[3],
        Biome::Snowy   => &[4, 5],
        Biome::Taiga   => &[6],
        Biome::Jungle  => &[7],
        Biome::Swamp   => &[8],
    }
}

/// Visual variant for an agent created at `pos` in `biome`.  Deterministic in
/// `(seed, pos)`.
pub fn pick_variant(seed: u64, biome: Biome, pos: BlockPos) -> u8 {
    let choices = palette(biome);
    PositionRng::new(seed, pos).choose(choices).copied().unwrap_or(0)
}

// ── AgentConversionService ────────────────────────────────────────────────────

/// Performs conversions against a world.
#[derive(Copy, Clone, Debug)]
pub struct AgentConversionService {
    seed: u64,
}

impl AgentConversionService {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Convert `source` into a new agent of `derived_kind`, consuming one
    /// `required_item` from its paired storage.
    ///
    /// Returns `None` (and changes nothing) if the source is gone, dead, not
    /// a villager, unpaired, or its storage lacks the item.
    pub fn convert<W: World + ?Sized>(
        &self,
        world: &mut W,
        source: AgentId,
        derived_kind: AgentKind,
        required_item: Item,
    ) -> Option<ConversionRecord> {
        let src = world.agent(source).filter(|a| a.alive && a.is_villager())?;
        let storage_pos = src.paired_storage?;
        let storage = world.inventory_at(storage_pos)?;
        if world.item_count(storage, required_item) == 0 {
            debug!(?source, item = %required_item, "conversion skipped: item missing");
            return None;
        }

        let pos = src.pos;
        let profession = src.profession;
        let variant = pick_variant(self.seed, world.biome_at(pos), pos);
        let derived = Agent {
            kind:         derived_kind,
            yaw:          src.yaw,
            display_name: src.display_name.clone(),
            variant,
            equipment:    Equipment { main_hand: Some(required_item), main_hand_drop_chance: 1.0 },
            ..Agent::villager(pos, Profession::Unemployed)
        };

        if !world.extract_item(storage, required_item, 1) {
            return None;
        }
        let derived_id = world.spawn_agent(derived);
        let released = world.release_claims(source);
        world.discard_agent(source);

        info!(
            ?source,
            ?derived_id,
            %profession,
            kind = %derived_kind,
            item = %required_item,
            %pos,
            released,
            "agent converted"
        );
        Some(ConversionRecord {
            source,
            derived: derived_id,
            kind: derived_kind,
            profession,
            item: required_item,
            pos,
            variant,
        })
    }
}
