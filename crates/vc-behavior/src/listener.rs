//! `StorageChangeListenerManager` — at most one storage listener per agent.
//!
//! Storages are compared by *identity* ([`StorageId`]), not by position: a
//! chest broken and re-placed at the same spot is a new storage and gets a
//! new listener, while re-pairing with the very same chest is a no-op.

use rustc_hash::FxHashMap;
use tracing::debug;

use vc_core::{AgentId, BlockPos, ListenerId, StorageId};
use vc_world::{ChangeListener, StorageAccess};

use crate::PairingRules;

/// What an agent's installed listener is attached to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ListenerRegistration {
    pub storage:  StorageId,
    pub pos:      BlockPos,
    pub listener: ListenerId,
}

/// Result of [`StorageChangeListenerManager::attach`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AttachOutcome {
    /// No listener was installed before; one is now.
    Installed,
    /// A listener on a different storage was removed and a new one installed.
    Replaced,
    /// Already listening on this storage; nothing changed.
    Unchanged,
    /// `pos` holds no supported storage.  Any previous listener was removed.
    Unsupported,
}

impl AttachOutcome {
    /// `true` if a listener is in place after the call.
    pub fn is_listening(self) -> bool {
        !matches!(self, AttachOutcome::Unsupported)
    }
}

#[derive(Debug, Default)]
pub struct StorageChangeListenerManager {
    registrations: FxHashMap<AgentId, ListenerRegistration>,
}

impl StorageChangeListenerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `agent` listen to the storage at `pos`.
    ///
    /// `make_listener` is only called when a new listener is actually
    /// installed.
    pub fn attach<W, F>(&mut self, world: &mut W, agent: AgentId, pos: BlockPos, make_listener: F) -> AttachOutcome
    where
        W: StorageAccess + ?Sized,
        F: FnOnce() -> ChangeListener,
    {
        let Some(storage) = world.inventory_at(pos) else {
            self.detach(world, agent);
            return AttachOutcome::Unsupported;
        };

        let replaced = match self.registrations.get(&agent) {
            Some(existing) if existing.storage == storage => return AttachOutcome::Unchanged,
            Some(_) => self.detach(world, agent),
            None => false,
        };

        let Some(listener) = world.add_change_listener(storage, make_listener()) else {
            return AttachOutcome::Unsupported;
        };
        self.registrations.insert(agent, ListenerRegistration { storage, pos, listener });
        debug!(?agent, %pos, %storage, "storage listener installed");
        if replaced { AttachOutcome::Replaced } else { AttachOutcome::Installed }
    }

    /// Remove `agent`'s listener, if any.  Returns `true` if one was recorded.
    ///
    /// The record is dropped even when the storage itself is already gone.
    pub fn detach<W: StorageAccess + ?Sized>(&mut self, world: &mut W, agent: AgentId) -> bool {
        let Some(reg) = self.registrations.remove(&agent) else {
            return false;
        };
        world.remove_change_listener(reg.storage, reg.listener);
        debug!(?agent, pos = %reg.pos, storage = %reg.storage, "storage listener removed");
        true
    }

    pub fn registration(&self, agent: AgentId) -> Option<&ListenerRegistration> {
        self.registrations.get(&agent)
    }

    /// Agents with an installed listener, ascending by id.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.registrations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Agents listening to a storage at or adjacent to `pos` (double chests
    /// span two blocks), ascending by id.
    pub fn agents_listening_near(&self, pos: BlockPos) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .registrations
            .iter()
            .filter(|(_, reg)| PairingRules::is_adjacent(reg.pos, pos))
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
