//! Agent kinds, professions, guard capabilities, biomes and POI kinds.

use crate::BlockKind;

/// Which kind of agent an entity is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Villager,
    /// Derived kind produced by conversion.
    Guard,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Villager => "villager",
            AgentKind::Guard    => "guard",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A villager's profession tag.  Mutable over an agent's life.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    #[default]
    Unemployed,
    Farmer,
    Butcher,
    Stonecutter,
    Fletcher,
    Weaponsmith,
    Armorer,
    Cartographer,
    Toolsmith,
    Cleric,
    Librarian,
}

impl Profession {
    /// Every profession, in declaration order.
    pub const ALL: [Profession; 11] = [
        Profession::Unemployed,
        Profession::Farmer,
        Profession::Butcher,
        Profession::Stonecutter,
        Profession::Fletcher,
        Profession::Weaponsmith,
        Profession::Armorer,
        Profession::Cartographer,
        Profession::Toolsmith,
        Profession::Cleric,
        Profession::Librarian,
    ];

    /// The workstation block this profession claims.
    pub fn job_block(self) -> Option<BlockKind> {
        Some(match self {
            Profession::Unemployed   => return None,
            Profession::Farmer       => BlockKind::Composter,
            Profession::Butcher      => BlockKind::Smoker,
            Profession::Stonecutter  => BlockKind::Stonecutter,
            Profession::Fletcher     => BlockKind::FletchingTable,
            Profession::Weaponsmith  => BlockKind::Grindstone,
            Profession::Armorer      => BlockKind::BlastFurnace,
            Profession::Cartographer => BlockKind::CartographyTable,
            Profession::Toolsmith    => BlockKind::SmithingTable,
            Profession::Cleric       => BlockKind::BrewingStand,
            Profession::Librarian    => BlockKind::Lectern,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profession::Unemployed   => "unemployed",
            Profession::Farmer       => "farmer",
            Profession::Butcher      => "butcher",
            Profession::Stonecutter  => "stonecutter",
            Profession::Fletcher     => "fletcher",
            Profession::Weaponsmith  => "weaponsmith",
            Profession::Armorer      => "armorer",
            Profession::Cartographer => "cartographer",
            Profession::Toolsmith    => "toolsmith",
            Profession::Cleric       => "cleric",
            Profession::Librarian    => "librarian",
        }
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flags a modifier block toggles on guards in range.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Granted by a training dummy: the guard may use ranged attacks.
    Trained,
    /// Granted by a beacon: the guard regenerates while on patrol.
    Regeneration,
}

impl Capability {
    #[inline]
    pub(crate) fn bit(self) -> u8 {
        match self {
            Capability::Trained      => 1 << 0,
            Capability::Regeneration => 1 << 1,
        }
    }
}

/// Compact set of [`Capability`] flags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    #[inline]
    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    /// Set `cap`.  Returns `true` if the flag was not already set.
    #[inline]
    pub fn insert(&mut self, cap: Capability) -> bool {
        let was_set = self.contains(cap);
        self.0 |= cap.bit();
        !was_set
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Biome at a world position.  Drives the visual variant of converted agents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    #[default]
    Plains,
    Desert,
    Savanna,
    Snowy,
    Taiga,
    Jungle,
    Swamp,
}

/// Kinds of point-of-interest claims an agent can hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PoiKind {
    JobSite,
    Home,
    MeetingPoint,
}
