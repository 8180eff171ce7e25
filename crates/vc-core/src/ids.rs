//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  None of them own anything: an
//! `AgentId` held by the coordination layer is a weak reference that must be
//! re-resolved against the world before use.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The ID following `self`; used by allocators handing out
            /// monotonically increasing identities.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Identity of a mobile agent (villager or guard).  Never reused: a
    /// converted agent gets a fresh id.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a behavior unit ("goal") inside the unit registry.
    pub struct UnitId(u32);
}

typed_id! {
    /// Identity of a concrete inventory object.  Replacing a chest at the same
    /// coordinate yields a different `StorageId`.
    pub struct StorageId(u32);
}

typed_id! {
    /// Handle of one change-listener installed on a storage.
    pub struct ListenerId(u32);
}
