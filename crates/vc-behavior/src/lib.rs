//! `vc-behavior` — which behavior unit exists for an agent, and when it is
//! retargeted or torn down.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`pairing`]    | `PairingRules`, `StructureClass`, distance constants          |
//! | [`unit`]       | `UnitKind`, `UnitTargets`, `BehaviorUnit`, `ChangeSignal`     |
//! | [`registry`]   | `BehaviorUnitRegistry` — at most one unit per (agent, kind)   |
//! | [`listener`]   | `StorageChangeListenerManager` — at most one listener per agent |
//! | [`candidates`] | `ConversionCandidateIndex`                                    |
//! | [`conversion`] | `ConversionRule`, `AgentConversionService`, `ConversionRecord` |
//! | [`profession`] | `ProfessionBehavior`, `PairingOutcome`                        |
//! | [`state`]      | `CoordState` — the registries bundled, plus the dead-agent sweep |
//! | [`error`]      | `PairingRejection`                                            |
//!
//! # Registration hygiene
//!
//! Every `upsert` / `attach` here has a matching `remove` / `detach` reachable
//! from every invalidation path: a failed pairing precondition, a dead agent
//! found by [`CoordState::sweep_dead`], and a completed conversion all funnel
//! through [`CoordState::forget`].

pub mod candidates;
pub mod conversion;
pub mod error;
pub mod listener;
pub mod pairing;
pub mod profession;
pub mod registry;
pub mod state;
pub mod unit;


pub use candidates::ConversionCandidateIndex;
pub use conversion::{AgentConversionService, ConversionRecord, ConversionRule, pick_variant};
pub use error::PairingRejection;
pub use listener::{AttachOutcome, ListenerRegistration, StorageChangeListenerManager};
pub use pairing::{
    CHEST_PAIRING_DISTANCE, JOB_BLOCK_DISCOVERY_DISTANCE, MODIFIER_DISTANCE, PLACEMENT_ADJACENCY,
    PairingRules, StructureClass,
};
pub use profession::{PairingOutcome, ProfessionBehavior};
pub use registry::BehaviorUnitRegistry;
pub use state::CoordState;
pub use unit::{BehaviorUnit, ChangeSignal, UnitKind, UnitTargets};
