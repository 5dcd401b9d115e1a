//! Item database and item stacks.
//!
//! Every item in the game is an [`ItemKind`]. Its immutable template data
//! lives in a static table reached through [`ItemKind::template`]; an
//! [`ItemStack`] pairs a kind with a quantity and a unique [`InstanceId`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for every item in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Logs from a tree.
    Logs,
    /// Copper ore from a rock.
    CopperOre,
    /// Bones dropped by enemies.
    Bones,
    /// Currency.
    Coins,
    /// Starter weapon.
    BronzeSword,
    /// Starter shield.
    BronzeKiteshield,
}

/// Broad item grouping used by the UI and by equip rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Gathered material.
    Resource,
    /// Used up on use (bones).
    Consumable,
    /// Coins.
    Currency,
    /// Main-hand equipment.
    Weapon,
    /// Off-hand equipment.
    Armor,
}

/// Equipment slot an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    /// Weapon hand.
    MainHand,
    /// Shield hand.
    OffHand,
}

/// Combat bonuses granted by an equipped item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Added to the attack level when rolling to hit.
    pub aim: i32,
    /// Raises the maximum hit.
    pub power: i32,
    /// Added to the defence level when rolling to block.
    pub defense: i32,
}

/// Immutable definition of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTemplate {
    /// Item this template describes.
    pub kind: ItemKind,
    /// Display name.
    pub name: &'static str,
    /// Broad category.
    pub category: ItemCategory,
    /// Whether multiple units share one stack.
    pub stackable: bool,
    /// Equipment slot, if the item can be worn.
    pub slot: Option<EquipSlot>,
    /// Combat bonuses.
    pub stats: ItemStats,
    /// Shop price in coins.
    pub value: u32,
    /// Experience granted when the item is gathered or buried.
    pub xp: f64,
}

const NO_STATS: ItemStats = ItemStats {
    aim: 0,
    power: 0,
    defense: 0,
};

static TEMPLATES: [ItemTemplate; 6] = [
    ItemTemplate {
        kind: ItemKind::Logs,
        name: "Logs",
        category: ItemCategory::Resource,
        stackable: false,
        slot: None,
        stats: NO_STATS,
        value: 4,
        xp: 25.0,
    },
    ItemTemplate {
        kind: ItemKind::CopperOre,
        name: "Copper Ore",
        category: ItemCategory::Resource,
        stackable: false,
        slot: None,
        stats: NO_STATS,
        value: 6,
        xp: 17.0,
    },
    ItemTemplate {
        kind: ItemKind::Bones,
        name: "Bones",
        category: ItemCategory::Consumable,
        stackable: false,
        slot: None,
        stats: NO_STATS,
        value: 1,
        xp: 4.5,
    },
    ItemTemplate {
        kind: ItemKind::Coins,
        name: "Coins",
        category: ItemCategory::Currency,
        stackable: true,
        slot: None,
        stats: NO_STATS,
        value: 1,
        xp: 0.0,
    },
    ItemTemplate {
        kind: ItemKind::BronzeSword,
        name: "Bronze Sword",
        category: ItemCategory::Weapon,
        stackable: false,
        slot: Some(EquipSlot::MainHand),
        stats: ItemStats {
            aim: 5,
            power: 4,
            defense: 0,
        },
        value: 20,
        xp: 0.0,
    },
    ItemTemplate {
        kind: ItemKind::BronzeKiteshield,
        name: "Bronze Kite",
        category: ItemCategory::Armor,
        stackable: false,
        slot: Some(EquipSlot::OffHand),
        stats: ItemStats {
            aim: 0,
            power: 0,
            defense: 6,
        },
        value: 40,
        xp: 0.0,
    },
];

impl ItemKind {
    /// Every item kind, in database order.
    pub const ALL: [Self; 6] = [
        Self::Logs,
        Self::CopperOre,
        Self::Bones,
        Self::Coins,
        Self::BronzeSword,
        Self::BronzeKiteshield,
    ];

    /// Returns the static template for this item.
    #[must_use]
    pub fn template(self) -> &'static ItemTemplate {
        &TEMPLATES[self as usize]
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.template().name
    }

    /// Whether units of this item merge into one stack.
    #[must_use]
    pub fn is_stackable(self) -> bool {
        self.template().stackable
    }

    /// Items the general store sells: everything with a price except coins.
    pub fn shop_stock() -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(|kind| *kind != Self::Coins && kind.template().value > 0)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier of a single item stack.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Creates an `InstanceId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

/// A quantity of one item kind held in a container or lying on the ground.
///
/// Non-stackable stacks always hold exactly one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Unique id of this stack.
    pub instance: InstanceId,
    /// What the stack holds.
    pub kind: ItemKind,
    /// How many units the stack holds.
    pub qty: u32,
}

impl ItemStack {
    /// Creates a stack. Non-stackable items are clamped to a quantity of one.
    #[must_use]
    pub fn new(instance: InstanceId, kind: ItemKind, qty: u32) -> Self {
        let qty = if kind.is_stackable() { qty } else { qty.min(1) };
        Self {
            instance,
            kind,
            qty,
        }
    }

    /// Returns the static template of the stacked item.
    #[must_use]
    pub fn template(&self) -> &'static ItemTemplate {
        self.kind.template()
    }
}

/// A stack lying on a world tile, owned by nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundItem {
    /// Tile the stack lies on.
    pub tile: crate::geometry::Tile,
    /// The stack itself.
    pub stack: ItemStack,
}
