//! Fluent builder for a pre-populated [`GridWorld`].
//!
//! # Usage
//!
//! ```rust
//! use vc_core::{Biome, BlockKind, BlockPos};
//! use vc_world::{GridWorldBuilder, SpatialWorldQuery};
//!
//! let world = GridWorldBuilder::new(Biome::Plains)
//!     .block(BlockPos::new(0, 64, 0), BlockKind::Stonecutter)
//!     .block(BlockPos::new(2, 64, 0), BlockKind::Chest)
//!     .build();
//!
//! assert_eq!(world.block_at(BlockPos::new(2, 64, 0)), BlockKind::Chest);
//! ```

use vc_core::{Biome, BlockBox, BlockKind, BlockPos};

use crate::GridWorld;

/// Fluent builder for [`GridWorld`].
///
/// Blocks are placed in call order, so a later `.block()` at the same
/// position replaces an earlier one exactly as `set_block` would.
pub struct GridWorldBuilder {
    default_biome: Biome,
    blocks:        Vec<(BlockPos, BlockKind)>,
    biomes:        Vec<(BlockBox, Biome)>,
}

impl GridWorldBuilder {
    pub fn new(default_biome: Biome) -> Self {
        Self { default_biome, blocks: Vec::new(), biomes: Vec::new() }
    }

    pub fn block(mut self, pos: BlockPos, kind: BlockKind) -> Self {
        self.blocks.push((pos, kind));
        self
    }

    pub fn biome(mut self, region: BlockBox, biome: Biome) -> Self {
        self.biomes.push((region, biome));
        self
    }

    pub fn build(self) -> GridWorld {
        let mut world = GridWorld::new(self.default_biome);
        for (region, biome) in self.biomes {
            world.set_biome_region(region, biome);
        }
        for (pos, kind) in self.blocks {
            world.set_block(pos, kind);
        }
        world
    }
}
