//! Inventories with synchronous change listeners.

use std::collections::BTreeMap;

use vc_core::{Item, ListenerId, StorageId};

/// Callback fired synchronously after every content mutation.  Carries no
/// payload; the listener re-reads whatever it needs.
pub type ChangeListener = Box<dyn FnMut()>;

/// The concrete inventory object behind a storage block.
pub struct Inventory {
    id:        StorageId,
    items:     BTreeMap<Item, u32>,
    listeners: Vec<(ListenerId, ChangeListener)>,
}

impl Inventory {
    pub fn new(id: StorageId) -> Self {
        Self { id, items: BTreeMap::new(), listeners: Vec::new() }
    }

    #[inline]
    pub fn id(&self) -> StorageId {
        self.id
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Add `n` of `item` and notify listeners.
    pub fn insert(&mut self, item: Item, n: u32) {
        if n == 0 {
            return;
        }
        *self.items.entry(item).or_insert(0) += n;
        self.notify();
    }

    /// Remove exactly `n` of `item`.  All-or-nothing: returns `false` and
    /// leaves the contents untouched if fewer than `n` are present.
    pub fn extract(&mut self, item: Item, n: u32) -> bool {
        let have = self.count(item);
        if n == 0 || have < n {
            return false;
        }
        if have == n {
            self.items.remove(&item);
        } else {
            self.items.insert(item, have - n);
        }
        self.notify();
        true
    }

    pub fn add_listener(&mut self, id: ListenerId, listener: ChangeListener) {
        self.listeners.push((id, listener));
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}
