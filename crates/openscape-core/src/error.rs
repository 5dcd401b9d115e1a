//! Error types.
//!
//! Player-facing rejections are [`InventoryError`] values whose `Display` text
//! is the message shown in the log. The other enums cover malformed input at
//! the crate boundary (terrain grids, save data).

use crate::entity::EntityId;

/// Errors produced while building a [`Terrain`](crate::terrain::Terrain).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// The grid has no rows or no columns.
    #[error("terrain grid is empty")]
    Empty,

    /// A row has a different length from the first row.
    #[error("terrain row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A tile code is not one of the known tile kinds.
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTile {
        /// The unrecognised code.
        code: u8,
        /// Column of the tile.
        x: usize,
        /// Row of the tile.
        y: usize,
    },

    /// A side exceeds the supported grid size.
    #[error("terrain {width}x{height} exceeds the maximum side length")]
    TooLarge {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}

/// Rejections from the inventory, equipment, bank and shop operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// No free slot and nothing to merge into.
    #[error("Inventory full")]
    Full,

    /// The coin stack does not cover the price.
    #[error("You need {price} coins to buy that.")]
    NotEnoughCoins {
        /// Price of the item.
        price: u32,
    },

    /// A slot index outside the container.
    #[error("slot {index} out of range (len {len})")]
    InvalidSlot {
        /// Requested slot.
        index: usize,
        /// Length of the container.
        len: usize,
    },

    /// The equipment slot holds nothing.
    #[error("equipment slot is empty")]
    EmptyEquipmentSlot,

    /// The item has no equipment slot.
    #[error("You can't equip {name}.")]
    NotEquippable {
        /// Display name of the item.
        name: &'static str,
    },

    /// Only bones can be buried.
    #[error("You can't bury {name}.")]
    NotBuryable {
        /// Display name of the item.
        name: &'static str,
    },

    /// The shop does not stock the item.
    #[error("The shop doesn't sell {name}.")]
    NotForSale {
        /// Display name of the item.
        name: &'static str,
    },

    /// The shop will not buy the item.
    #[error("You can't sell {name}.")]
    Unsellable {
        /// Display name of the item.
        name: &'static str,
    },
}

impl InventoryError {
    /// Returns `true` for guard failures caused by stale or malformed input.
    ///
    /// These are cancelled silently instead of being reported to the player.
    #[must_use]
    pub const fn is_guard(&self) -> bool {
        matches!(self, Self::InvalidSlot { .. } | Self::EmptyEquipmentSlot)
    }
}

/// Errors produced while resuming a session from save data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// Two resources or npcs share an id.
    #[error("entity id {0} appears more than once")]
    DuplicateEntity(EntityId),

    /// The player's hitpoints exceed the maximum.
    #[error("player hp {hp} exceeds max hp {max_hp}")]
    InvalidHitpoints {
        /// Saved hitpoints.
        hp: u32,
        /// Saved maximum.
        max_hp: u32,
    },

    /// The inventory holds more stacks than the configured capacity.
    #[error("inventory holds {len} stacks, capacity is {capacity}")]
    InventoryOverflow {
        /// Saved stack count.
        len: usize,
        /// Configured capacity.
        capacity: usize,
    },

    /// A container holds two stacks of the same stackable kind.
    #[error("{container} holds more than one stack of {name}")]
    DuplicateStack {
        /// Which container: inventory or bank.
        container: &'static str,
        /// Display name of the item.
        name: &'static str,
    },

    /// A non-stackable item has a quantity other than one.
    #[error("{container} holds {qty} of non-stackable {name}")]
    InvalidQuantity {
        /// Which container: inventory, bank, equipment or ground.
        container: &'static str,
        /// Display name of the item.
        name: &'static str,
        /// Saved quantity.
        qty: u32,
    },
}
