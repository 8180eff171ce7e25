//! Pure classification of blocks and the pairing distance policy.

use vc_core::{BlockKind, BlockPos, Capability, Profession};

/// Maximum job-site ↔ storage (and job-site ↔ crafting surface) distance.
pub const CHEST_PAIRING_DISTANCE: f64 = 3.0;

/// Radius searched around a placed storage for candidate job sites, and
/// around a banner for guards.
pub const JOB_BLOCK_DISCOVERY_DISTANCE: f64 = 8.0;

/// Reach of a modifier block over converted agents.
pub const MODIFIER_DISTANCE: f64 = 16.0;

/// Two blocks within this many blocks on every axis are treated as touching
/// (e.g. the two halves of a double chest).
pub const PLACEMENT_ADJACENCY: i32 = 1;

/// What a block means to the coordination layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StructureClass {
    JobBlock(Profession),
    Storage,
    CraftingSurface,
    Modifier(Capability),
    Banner,
    /// Callers ignore placements of unclassified blocks.
    Unclassified,
}

/// Stateless classification and distance rules.
pub struct PairingRules;

impl PairingRules {
    pub fn classify(kind: BlockKind) -> StructureClass {
        if let Some(profession) = kind.job_profession() {
            return StructureClass::JobBlock(profession);
        }
        if let Some(cap) = kind.modifier_capability() {
            return StructureClass::Modifier(cap);
        }
        match kind {
            k if k.is_storage()      => StructureClass::Storage,
            BlockKind::CraftingTable => StructureClass::CraftingSurface,
            BlockKind::Banner        => StructureClass::Banner,
            _                        => StructureClass::Unclassified,
        }
    }

    /// Distance threshold used when pairing a structure of `class`.
    pub fn pairing_distance(class: StructureClass) -> Option<f64> {
        match class {
            StructureClass::Storage | StructureClass::CraftingSurface => Some(CHEST_PAIRING_DISTANCE),
            StructureClass::JobBlock(_) | StructureClass::Banner => Some(JOB_BLOCK_DISCOVERY_DISTANCE),
            StructureClass::Modifier(_) => Some(MODIFIER_DISTANCE),
            StructureClass::Unclassified => None,
        }
    }

    /// Block-count radius covering `distance` (rounded up).
    #[inline]
    pub fn search_radius(distance: f64) -> i32 {
        distance.ceil() as i32
    }

    /// `true` if a job site at `job` may pair with a structure at `other`.
    #[inline]
    pub fn within_pairing_range(job: BlockPos, other: BlockPos) -> bool {
        job.within(other, CHEST_PAIRING_DISTANCE)
    }

    /// Chebyshev adjacency (see [`PLACEMENT_ADJACENCY`]).
    #[inline]
    pub fn is_adjacent(a: BlockPos, b: BlockPos) -> bool {
        (a.x - b.x).abs() <= PLACEMENT_ADJACENCY
            && (a.y - b.y).abs() <= PLACEMENT_ADJACENCY
            && (a.z - b.z).abs() <= PLACEMENT_ADJACENCY
    }
}
