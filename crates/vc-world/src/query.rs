//! The seams between the coordination engine and the world it runs in.
//!
//! Each trait is one external collaborator.  The engine is generic over
//! [`World`] (the union of all four) so it can run against a real game world
//! or against [`GridWorld`][crate::GridWorld] in tests.
//!
//! None of these methods return errors: "no such block", "no such agent" and
//! "not enough items" are ordinary answers the coordination layer branches
//! on, not failures.

use vc_core::{AgentId, Biome, BlockBox, BlockKind, BlockPos, Item, ListenerId, StorageId, UnitId};

use crate::{Agent, ChangeListener};

/// Point and box queries over blocks and entities.
pub trait SpatialWorldQuery {
    /// Current block at `pos` (`BlockKind::Air` if empty).
    fn block_at(&self, pos: BlockPos) -> BlockKind;

    /// Every non-air block inside `bbox`, in ascending position order.
    fn blocks_in_box(&self, bbox: &BlockBox) -> Vec<(BlockPos, BlockKind)>;

    /// Ids of agents standing inside `bbox` that satisfy `filter`, in
    /// ascending id order.
    fn entities_in_box(&self, bbox: &BlockBox, filter: &dyn Fn(&Agent) -> bool) -> Vec<AgentId>;

    fn agent(&self, id: AgentId) -> Option<&Agent>;

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent>;

    /// Every agent currently present in the world, in ascending id order.
    fn agent_ids(&self) -> Vec<AgentId>;

    fn biome_at(&self, pos: BlockPos) -> Biome;

    /// `true` if `id` is present and alive.
    fn is_alive(&self, id: AgentId) -> bool {
        self.agent(id).is_some_and(|a| a.alive)
    }
}

/// Inventory lookup, extraction and change listeners.
pub trait StorageAccess {
    /// Identity of the inventory behind `pos`, if the block is a storage.
    fn inventory_at(&self, pos: BlockPos) -> Option<StorageId>;

    fn item_count(&self, storage: StorageId, item: Item) -> u32;

    /// Remove exactly `count` of `item`; all-or-nothing.
    fn extract_item(&mut self, storage: StorageId, item: Item, count: u32) -> bool;

    /// Install `listener` on `storage`.  `None` if the storage no longer exists.
    fn add_change_listener(&mut self, storage: StorageId, listener: ChangeListener) -> Option<ListenerId>;

    /// Remove a listener.  `false` if either the storage or the listener is gone.
    fn remove_change_listener(&mut self, storage: StorageId, id: ListenerId) -> bool;
}

/// Each agent's own goal selector.
///
/// Priorities are stable and the scheduler never drops a unit by itself.
pub trait GoalScheduler {
    /// Enrol `unit` in `agent`'s decision loop.  `false` if the agent is gone
    /// or the unit is already registered.
    fn register_goal(&mut self, agent: AgentId, priority: u8, unit: UnitId) -> bool;

    fn unregister_goal(&mut self, agent: AgentId, unit: UnitId) -> bool;
}

/// Agent insertion, removal and point-of-interest claims.
pub trait AgentLifecycle {
    /// Insert `agent` into the world, assigning and returning a fresh id.
    fn spawn_agent(&mut self, agent: Agent) -> AgentId;

    /// Remove `id` from the world.  `false` if it was not present.
    fn discard_agent(&mut self, id: AgentId) -> bool;

    /// Agent holding the point-of-interest claim at `pos`, if any.
    fn claim_holder(&self, pos: BlockPos) -> Option<AgentId>;

    /// Release every claim `id` holds.  Returns how many were released.
    fn release_claims(&mut self, id: AgentId) -> usize;
}

/// Everything the coordination engine needs from a world.
pub trait World: SpatialWorldQuery + StorageAccess + GoalScheduler + AgentLifecycle {}

impl<T> World for T where T: SpatialWorldQuery + StorageAccess + GoalScheduler + AgentLifecycle {}
