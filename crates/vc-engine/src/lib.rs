//! `vc-engine` — drives the coordination layer from world events.
//!
//! # Tick loop
//!
//! ```text
//! world event callbacks (placement, removal, region load, job claim)
//!   └─ enqueue a WorkItem; never touch the world
//!
//! Engine::tick(now):
//!   ① Work     — drain items due at or before `now`, in arrival order, and
//!                hand each to the JobBlockPairingCoordinator.
//!   ② Sweep    — forget agents that died or left the world.
//!   ③ Convert  — every `conversion_sweep_interval_ticks`: poll conversion
//!                candidates per convertible profession and convert.
//!   ④ Snapshot — every `snapshot_interval_ticks`: population counts to the
//!                observer.
//! ```
//!
//! Deferring ① is what keeps placement handling from ever running inside the
//! world's own mutation of a block.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vc_core::EngineConfig;
//! use vc_engine::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default(), world).build()?;
//! engine.on_block_placed(chest_pos);
//! engine.run_ticks(1, &mut NoopObserver);
//! ```

pub mod builder;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod observer;
pub mod population;
pub mod work_queue;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use coordinator::{JobBlockPairingCoordinator, PlacementOutcome};
pub use engine::{Engine, TickSummary};
pub use error::{EngineError, EngineResult};
pub use observer::{CoordinationObserver, NoopObserver};
pub use population::PopulationCounts;
pub use work_queue::{WorkItem, WorkQueue};
