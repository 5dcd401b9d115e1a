//! Container bookkeeping plus the equipment, bank and shop transactions.
//!
//! Containers are plain `Vec<ItemStack>`s. Two rules hold for every one of
//! them:
//! - a stackable item occupies at most one stack per container
//! - a capped container never grows past its capacity; only merges into an
//!   existing stack are allowed once it is full
//!
//! The transaction functions validate everything before mutating, so a
//! rejected call leaves the player untouched.

use crate::entity::IdAllocator;
use crate::error::InventoryError;
use crate::item::{EquipSlot, InstanceId, ItemKind, ItemStack};
use crate::player::{Player, Skill};

// =============================================================================
// Container primitives
// =============================================================================

/// Index of the stack holding `kind`, if any.
#[must_use]
pub fn find_stack(container: &[ItemStack], kind: ItemKind) -> Option<usize> {
    container.iter().position(|s| s.kind == kind)
}

/// Returns `true` if one more unit of `kind` fits.
///
/// `None` capacity means uncapped (the bank).
#[must_use]
pub fn has_room_for(container: &[ItemStack], kind: ItemKind, capacity: Option<usize>) -> bool {
    if kind.is_stackable() && find_stack(container, kind).is_some() {
        return true;
    }
    capacity.map_or(true, |cap| container.len() < cap)
}

/// Adds `qty` units of `kind` as a fresh stack or by merging.
///
/// Non-stackable items always form a single-unit stack. Returns `false` and
/// leaves the container unchanged if there is no room; callers that want to
/// report "Inventory full" check [`has_room_for`] first.
pub fn add_item(
    container: &mut Vec<ItemStack>,
    kind: ItemKind,
    qty: u32,
    capacity: Option<usize>,
    item_ids: &mut IdAllocator,
) -> bool {
    if kind.is_stackable() {
        if let Some(index) = find_stack(container, kind) {
            container[index].qty = container[index].qty.saturating_add(qty);
            return true;
        }
    }
    if !has_room_for(container, kind, capacity) {
        return false;
    }
    container.push(ItemStack::new(
        InstanceId::new(item_ids.allocate()),
        kind,
        qty,
    ));
    true
}

/// Moves an existing stack into the container, merging stackables.
///
/// # Errors
///
/// Hands the stack back if the container has no room for it.
pub fn insert_stack(
    container: &mut Vec<ItemStack>,
    stack: ItemStack,
    capacity: Option<usize>,
) -> Result<(), ItemStack> {
    if stack.kind.is_stackable() {
        if let Some(index) = find_stack(container, stack.kind) {
            container[index].qty = container[index].qty.saturating_add(stack.qty);
            return Ok(());
        }
    }
    if !has_room_for(container, stack.kind, capacity) {
        return Err(stack);
    }
    container.push(stack);
    Ok(())
}

/// Removes and returns the stack at `index`, or `None` if out of range.
pub fn remove_item(container: &mut Vec<ItemStack>, index: usize) -> Option<ItemStack> {
    (index < container.len()).then(|| container.remove(index))
}

fn check_slot(container: &[ItemStack], index: usize) -> Result<&ItemStack, InventoryError> {
    container.get(index).ok_or(InventoryError::InvalidSlot {
        index,
        len: container.len(),
    })
}

// =============================================================================
// Equipment
// =============================================================================

/// Wears the inventory item at `index`, swapping out whatever held its slot.
///
/// Returns the name of the equipped item.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index,
/// [`InventoryError::NotEquippable`] for items without a slot.
pub fn equip(player: &mut Player, index: usize, capacity: usize) -> Result<&'static str, InventoryError> {
    let template = check_slot(&player.inventory, index)?.template();
    let slot = template.slot.ok_or(InventoryError::NotEquippable {
        name: template.name,
    })?;

    let item = player.inventory.remove(index);
    if let Some(previous) = player.equipment.slot_mut(slot).take() {
        if let Err(previous) = insert_stack(&mut player.inventory, previous, Some(capacity)) {
            *player.equipment.slot_mut(slot) = Some(previous);
            player.inventory.insert(index, item);
            return Err(InventoryError::Full);
        }
    }
    *player.equipment.slot_mut(slot) = Some(item);
    Ok(template.name)
}

/// Returns the item worn in `slot` to the inventory.
///
/// Returns the name of the removed item.
///
/// # Errors
///
/// [`InventoryError::EmptyEquipmentSlot`] if nothing is worn there,
/// [`InventoryError::Full`] if the inventory has no room.
pub fn unequip(player: &mut Player, slot: EquipSlot, capacity: usize) -> Result<&'static str, InventoryError> {
    let kind = player
        .equipment
        .get(slot)
        .map(|s| s.kind)
        .ok_or(InventoryError::EmptyEquipmentSlot)?;
    if !has_room_for(&player.inventory, kind, Some(capacity)) {
        return Err(InventoryError::Full);
    }
    if let Some(item) = player.equipment.slot_mut(slot).take() {
        insert_stack(&mut player.inventory, item, Some(capacity)).map_err(|_| InventoryError::Full)?;
    }
    Ok(kind.name())
}

// =============================================================================
// Shop
// =============================================================================

/// Buys one unit of `kind` at its template value.
///
/// Paying with a coin stack that is used up exactly frees its slot, which
/// makes room for the purchase even in a full inventory.
///
/// # Errors
///
/// [`InventoryError::NotForSale`], [`InventoryError::NotEnoughCoins`] or
/// [`InventoryError::Full`].
pub fn shop_buy(
    player: &mut Player,
    kind: ItemKind,
    capacity: usize,
    item_ids: &mut IdAllocator,
) -> Result<(), InventoryError> {
    if !ItemKind::shop_stock().any(|k| k == kind) {
        return Err(InventoryError::NotForSale { name: kind.name() });
    }
    let price = kind.template().value;
    let coins = find_stack(&player.inventory, ItemKind::Coins)
        .filter(|&i| player.inventory[i].qty >= price)
        .ok_or(InventoryError::NotEnoughCoins { price })?;

    let frees_slot = player.inventory[coins].qty == price;
    if !frees_slot && !has_room_for(&player.inventory, kind, Some(capacity)) {
        return Err(InventoryError::Full);
    }

    if frees_slot {
        player.inventory.remove(coins);
    } else {
        player.inventory[coins].qty -= price;
    }
    add_item(&mut player.inventory, kind, 1, Some(capacity), item_ids);
    Ok(())
}

/// Sells the inventory stack at `index`.
///
/// Each unit pays `max(1, floor(value * sell_ratio))` coins. Returns the
/// total paid.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index,
/// [`InventoryError::Unsellable`] for coins.
pub fn shop_sell(
    player: &mut Player,
    index: usize,
    sell_ratio: f64,
    capacity: usize,
    item_ids: &mut IdAllocator,
) -> Result<u32, InventoryError> {
    let stack = check_slot(&player.inventory, index)?;
    if stack.kind == ItemKind::Coins {
        return Err(InventoryError::Unsellable {
            name: stack.kind.name(),
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let unit = ((f64::from(stack.template().value) * sell_ratio).floor() as u32).max(1);
    let paid = unit.saturating_mul(stack.qty);

    player.inventory.remove(index);
    add_item(&mut player.inventory, ItemKind::Coins, paid, Some(capacity), item_ids);
    Ok(paid)
}

// =============================================================================
// Bank, ground and consumables
// =============================================================================

/// Moves the inventory stack at `index` into the bank.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index.
pub fn deposit(player: &mut Player, index: usize) -> Result<(), InventoryError> {
    check_slot(&player.inventory, index)?;
    let stack = player.inventory.remove(index);
    // The bank is uncapped, so this always succeeds.
    let _ = insert_stack(&mut player.bank, stack, None);
    Ok(())
}

/// Moves the bank stack at `index` into the inventory.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index,
/// [`InventoryError::Full`] if the inventory has no room.
pub fn withdraw(player: &mut Player, index: usize, capacity: usize) -> Result<(), InventoryError> {
    let kind = check_slot(&player.bank, index)?.kind;
    if !has_room_for(&player.inventory, kind, Some(capacity)) {
        return Err(InventoryError::Full);
    }
    let stack = player.bank.remove(index);
    insert_stack(&mut player.inventory, stack, Some(capacity)).map_err(|_| InventoryError::Full)
}

/// Takes the inventory stack at `index` out so it can be placed on the ground.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index.
pub fn drop(player: &mut Player, index: usize) -> Result<ItemStack, InventoryError> {
    check_slot(&player.inventory, index)?;
    Ok(player.inventory.remove(index))
}

/// Buries the bones at `index`, granting their prayer experience.
///
/// Returns the experience granted.
///
/// # Errors
///
/// [`InventoryError::InvalidSlot`] for a bad index,
/// [`InventoryError::NotBuryable`] for anything but bones.
pub fn bury(player: &mut Player, index: usize) -> Result<f64, InventoryError> {
    let kind = check_slot(&player.inventory, index)?.kind;
    if kind != ItemKind::Bones {
        return Err(InventoryError::NotBuryable { name: kind.name() });
    }
    player.inventory.remove(index);
    let xp = kind.template().xp;
    player.skills.add_xp(Skill::Prayer, xp);
    Ok(xp)
}
