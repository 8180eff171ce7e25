//! Block and item vocabulary shared by the world and coordination crates.
//!
//! The coordination layer never caches a `BlockKind` beyond one pass: blocks
//! are re-read from the world every time a pairing is evaluated.

use crate::{Capability, Profession};

/// What occupies a block position.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Air,
    /// Any inert solid block.
    Stone,

    // ── Storage ───────────────────────────────────────────────────────────
    Chest,
    Barrel,

    // ── Crafting surfaces ─────────────────────────────────────────────────
    CraftingTable,

    // ── Job blocks ────────────────────────────────────────────────────────
    Composter,
    Smoker,
    Stonecutter,
    FletchingTable,
    Grindstone,
    BlastFurnace,
    CartographyTable,
    SmithingTable,
    BrewingStand,
    Lectern,

    // ── Modifier blocks ───────────────────────────────────────────────────
    TrainingDummy,
    Beacon,

    Banner,
}

impl BlockKind {
    /// The profession whose workstation this block is, if any.
    pub fn job_profession(self) -> Option<Profession> {
        Some(match self {
            BlockKind::Composter        => Profession::Farmer,
            BlockKind::Smoker           => Profession::Butcher,
            BlockKind::Stonecutter      => Profession::Stonecutter,
            BlockKind::FletchingTable   => Profession::Fletcher,
            BlockKind::Grindstone       => Profession::Weaponsmith,
            BlockKind::BlastFurnace     => Profession::Armorer,
            BlockKind::CartographyTable => Profession::Cartographer,
            BlockKind::SmithingTable    => Profession::Toolsmith,
            BlockKind::BrewingStand     => Profession::Cleric,
            BlockKind::Lectern          => Profession::Librarian,
            _ => return None,
        })
    }

    /// The guard capability this block grants to guards in range, if any.
    pub fn modifier_capability(self) -> Option<Capability> {
        match self {
            BlockKind::TrainingDummy => Some(Capability::Trained),
            BlockKind::Beacon        => Some(Capability::Regeneration),
            _ => None,
        }
    }

    /// `true` for blocks backed by an inventory.
    #[inline]
    pub fn is_storage(self) -> bool {
        matches!(self, BlockKind::Chest | BlockKind::Barrel)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Air              => "air",
            BlockKind::Stone            => "stone",
            BlockKind::Chest            => "chest",
            BlockKind::Barrel           => "barrel",
            BlockKind::CraftingTable    => "crafting_table",
            BlockKind::Composter        => "composter",
            BlockKind::Smoker           => "smoker",
            BlockKind::Stonecutter      => "stonecutter",
            BlockKind::FletchingTable   => "fletching_table",
            BlockKind::Grindstone       => "grindstone",
            BlockKind::BlastFurnace     => "blast_furnace",
            BlockKind::CartographyTable => "cartography_table",
            BlockKind::SmithingTable    => "smithing_table",
            BlockKind::BrewingStand     => "brewing_stand",
            BlockKind::Lectern          => "lectern",
            BlockKind::TrainingDummy    => "training_dummy",
            BlockKind::Beacon           => "beacon",
            BlockKind::Banner           => "banner",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item types that matter to coordination (conversion tools and trade goods).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Axe,
    Sword,
    Bow,
    Arrow,
    Wheat,
    Bread,
    Beef,
    Emerald,
    IronIngot,
}

impl Item {
    pub fn as_str(self) -> &'static str {
        match self {
            Item::Axe       => "axe",
            Item::Sword     => "sword",
            Item::Bow       => "bow",
            Item::Arrow     => "arrow",
            Item::Wheat     => "wheat",
            Item::Bread     => "bread",
            Item::Beef      => "beef",
            Item::Emerald   => "emerald",
            Item::IronIngot => "iron_ingot",
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
