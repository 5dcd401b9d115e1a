//! World entities: resources and npcs.
//!
//! This module provides:
//! - [`EntityId`]: Unique identifier for resources and npcs
//! - [`IdAllocator`]: Monotonic id source shared by entities and item stacks
//! - [`Resource`] / [`Npc`]: Static-position world objects and actors
//!
//! Entities are created once at world init and never destroyed. They only
//! cycle between active/depleted or alive/dead with timer-driven respawn.
//!
//! # Example
//!
//! ```
//! use openscape_core::entity::{EntityId, Resource, ResourceKind};
//! use openscape_core::geometry::Tile;
//!
//! let mut tree = Resource::new(EntityId::new(42), ResourceKind::Tree, Tile::new(3, 4));
//! assert!(tree.is_active());
//!
//! tree.deplete(10);
//! assert!(!tree.is_active());
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{Npc, NpcCategory, NpcStatus, Resource, ResourceKind, ResourceStatus};

/// Unique identifier for a resource or npc.
///
/// `EntityId` is a newtype wrapper around `u64`. Ids are immutable once
/// assigned and unique within a world.
///
/// # Example
///
/// ```
/// use openscape_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    ///
    /// # Arguments
    ///
    /// * `id` - The raw identifier value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Monotonic id source.
///
/// The world keeps one allocator for entities and one for item stacks. Both
/// are part of the world state so that cloned states keep allocating
/// disjoint ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Creates an allocator whose first id is `next`.
    #[must_use]
    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Returns the next raw id and advances the counter.
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the id that the next call to [`allocate`](Self::allocate) yields.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }
}
