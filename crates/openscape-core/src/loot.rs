//! Loot tables.
//!
//! Each npc category maps to a static table. Every entry is rolled
//! independently, so one kill can yield several drops.

use rand::{Rng, RngCore};

use crate::entity::{IdAllocator, NpcCategory};
use crate::item::{InstanceId, ItemKind, ItemStack};

/// One independently rolled drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootEntry {
    /// Item dropped.
    pub item: ItemKind,
    /// Probability in `0.0..=1.0`.
    pub chance: f64,
    /// Smallest quantity (inclusive).
    pub min: u32,
    /// Largest quantity (inclusive).
    pub max: u32,
}

const GOBLIN: [LootEntry; 4] = [
    LootEntry {
        item: ItemKind::Bones,
        chance: 1.0,
        min: 1,
        max: 1,
    },
    LootEntry {
        item: ItemKind::Coins,
        chance: 0.5,
        min: 2,
        max: 15,
    },
    LootEntry {
        item: ItemKind::BronzeKiteshield,
        chance: 0.1,
        min: 1,
        max: 1,
    },
    LootEntry {
        item: ItemKind::BronzeSword,
        chance: 0.05,
        min: 1,
        max: 1,
    },
];

/// Loot table for an npc category. Shopkeepers drop nothing.
#[must_use]
pub const fn table(category: NpcCategory) -> &'static [LootEntry] {
    match category {
        NpcCategory::Enemy => &GOBLIN,
        NpcCategory::Shop => &[],
    }
}

/// Rolls the loot table of `category`.
///
/// An entry drops when a uniform roll in `[0, 1)` is at most its chance;
/// the quantity is uniform in `min..=max` (no draw for fixed quantities).
///
/// # Arguments
///
/// * `category` - Category of the defeated npc
/// * `rng` - Random source
/// * `item_ids` - Allocator for the new stacks' instance ids
pub fn roll_loot(
    category: NpcCategory,
    rng: &mut dyn RngCore,
    item_ids: &mut IdAllocator,
) -> Vec<ItemStack> {
    table(category)
        .iter()
        .filter_map(|entry| {
            if rng.gen::<f64>() > entry.chance {
                return None;
            }
            let qty = if entry.min == entry.max {
                entry.min
            } else {
                rng.gen_range(entry.min..=entry.max)
            };
            Some(ItemStack::new(
                InstanceId::new(item_ids.allocate()),
                entry.item,
                qty,
            ))
        })
        .collect()
}
