//! Deterministic position-seeded RNG.
//!
//! Visual variants of converted agents are "a deterministic function of world
//! position": the same world seed and the same block always yield the same
//! choice, independent of the order conversions happen in.
//!
//!   seed = world_seed XOR mix(x) XOR mix(y) XOR mix(z)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads neighbouring coordinates across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BlockPos;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// RNG seeded from a world seed and a block position.
pub struct PositionRng(SmallRng);

impl PositionRng {
    pub fn new(world_seed: u64, pos: BlockPos) -> Self {
        let mix = |v: i32, lane: u64| (v as u32 as u64 ^ lane).wrapping_mul(MIXING_CONSTANT);
        let seed = world_seed ^ mix(pos.x, 1) ^ mix(pos.y, 2).rotate_left(21) ^ mix(pos.z, 3).rotate_left(42);
        PositionRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a non-empty slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
