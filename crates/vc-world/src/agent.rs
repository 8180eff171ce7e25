//! The `Agent` record owned by the world.

use vc_core::{AgentId, AgentKind, BlockPos, CapabilitySet, Item, Profession};

/// What an agent is holding and how likely it is to drop it on death.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Equipment {
    pub main_hand: Option<Item>,
    /// Probability in `[0, 1]` that `main_hand` drops on death.  `1.0` means
    /// the item is always retained by the world rather than destroyed.
    pub main_hand_drop_chance: f32,
}

/// A mobile simulated actor.
///
/// Pairing state (`paired_storage`, `paired_crafting`) is only meaningful
/// while `alive` is `true`; the coordination layer re-validates it on every
/// entry point.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// Assigned by the world on spawn.
    pub id:              AgentId,
    pub kind:            AgentKind,
    pub pos:             BlockPos,
    pub yaw:             f32,
    pub alive:           bool,
    pub profession:      Profession,

    // ── World claims ──────────────────────────────────────────────────────
    pub job_site:        Option<BlockPos>,
    pub home:            Option<BlockPos>,
    pub meeting_point:   Option<BlockPos>,

    // ── Pairing record ────────────────────────────────────────────────────
    pub paired_storage:  Option<BlockPos>,
    pub paired_crafting: Option<BlockPos>,

    // ── Identity and presentation ─────────────────────────────────────────
    pub display_name:    Option<String>,
    pub variant:         u8,
    pub equipment:       Equipment,

    // ── Guard-only state ──────────────────────────────────────────────────
    pub capabilities:    CapabilitySet,
    pub rally_point:     Option<BlockPos>,
}

impl Agent {
    /// A live villager at `pos` with no claims.
    pub fn villager(pos: BlockPos, profession: Profession) -> Self {
        Self {
            id:              AgentId::INVALID,
            kind:            AgentKind::Villager,
            pos,
            yaw:             0.0,
            alive:           true,
            profession,
            job_site:        None,
            home:            None,
            meeting_point:   None,
            paired_storage:  None,
            paired_crafting: None,
            display_name:    None,
            variant:         0,
            equipment:       Equipment::default(),
            capabilities:    CapabilitySet::default(),
            rally_point:     None,
        }
    }

    /// A live, unequipped guard at `pos`.
    pub fn guard(pos: BlockPos) -> Self {
        Self { kind: AgentKind::Guard, ..Self::villager(pos, Profession::Unemployed) }
    }

    #[inline]
    pub fn is_villager(&self) -> bool {
        self.kind == AgentKind::Villager
    }

    #[inline]
    pub fn is_guard(&self) -> bool {
        self.kind == AgentKind::Guard
    }

    /// Forget any recorded storage / crafting pairing.
    pub fn clear_pairing(&mut self) {
        self.paired_storage = None;
        self.paired_crafting = None;
    }
}
