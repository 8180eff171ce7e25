//! `vc-world` — the world the coordination engine runs against.
//!
//! The physical world, its spatial index, inventories and per-agent goal
//! selectors are *external collaborators*: the engine only calls them through
//! the traits in [`query`].  [`GridWorld`] is an in-memory implementation of
//! those traits used by tests and the demo binary.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`query`]     | `SpatialWorldQuery`, `StorageAccess`, `GoalScheduler`, `AgentLifecycle`, `World` |
//! | [`agent`]     | `Agent` record, `Equipment`                                  |
//! | [`inventory`] | `Inventory` with change listeners, `ChangeListener`          |
//! | [`goal`]      | `GoalSelector`, `GoalEntry`                                  |
//! | [`grid`]      | `GridWorld` (BTreeMap blocks + R-tree agent index)           |
//! | [`builder`]   | `GridWorldBuilder`                                           |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                               |

pub mod agent;
pub mod builder;
pub mod error;
pub mod goal;
pub mod grid;
pub mod inventory;
pub mod query;


pub use agent::{Agent, Equipment};
pub use builder::GridWorldBuilder;
pub use error::{WorldError, WorldResult};
pub use goal::{GoalEntry, GoalSelector};
pub use grid::GridWorld;
pub use inventory::{ChangeListener, Inventory};
pub use query::{AgentLifecycle, GoalScheduler, SpatialWorldQuery, StorageAccess, World};
