//! `vc-core` — foundational types for the village coordination engine.
//!
//! This crate is a dependency of every other `vc-*` crate.  It has no `vc-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | `AgentId`, `UnitId`, `StorageId`, `ListenerId`            |
//! | [`geo`]        | `BlockPos`, `BlockBox`, squared-distance helpers          |
//! | [`time`]       | `Tick`, `SimClock`                                        |
//! | [`rng`]        | `PositionRng` (deterministic per-position sampling)      |
//! | [`block`]      | `BlockKind`, `Item`                                       |
//! | [`profession`] | `Profession`, `AgentKind`, `Capability`, `Biome`, `PoiKind` |
//! | [`config`]     | `EngineConfig`                                            |
//! | [`error`]      | `CoreError`, `CoreResult`                                 |

pub mod block;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod profession;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use block::{BlockKind, Item};
pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{BlockBox, BlockPos};
pub use ids::{AgentId, ListenerId, StorageId, UnitId};
pub use profession::{AgentKind, Biome, Capability, CapabilitySet, PoiKind, Profession};
pub use rng::PositionRng;
pub use time::{SimClock, Tick};
