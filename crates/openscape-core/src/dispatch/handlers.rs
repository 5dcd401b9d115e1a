//! Built-in handlers, one per [`ActionKind`](super::ActionKind).
//!
//! Every handler clones the incoming state, applies its change to the copy
//! and returns it. Player-facing rejections become log messages; guard
//! failures (stale slot indices, a transaction with the wrong interface
//! open) are logged for the operator and leave the state unchanged.

use crate::error::InventoryError;
use crate::geometry::Tile;
use crate::interaction;
use crate::inventory;
use crate::resolver;
use crate::state::{Interface, WorldState};

use super::{Action, DispatchContext};

/// Applies an inventory operation to a copy of `state`.
///
/// On success `report` may log a message on the new state. On a player-facing
/// rejection the unchanged copy gets the error text as a system message; on a
/// guard failure the copy is returned silently.
fn apply<T>(
    state: &WorldState,
    action: &Action,
    op: impl FnOnce(&mut WorldState) -> Result<T, InventoryError>,
    report: impl FnOnce(&mut WorldState, T),
) -> WorldState {
    let mut next = state.clone();
    match op(&mut next) {
        Ok(value) => {
            report(&mut next, value);
            next
        }
        Err(err) if err.is_guard() => {
            tracing::warn!(?action, %err, "action rejected");
            state.clone()
        }
        Err(err) => {
            let mut unchanged = state.clone();
            unchanged.log_system(err.to_string());
            unchanged
        }
    }
}

fn mismatched(state: &WorldState, action: &Action) -> WorldState {
    tracing::warn!(?action, "handler received a different action kind");
    state.clone()
}

fn requires_interface(state: &WorldState, action: &Action, interface: Interface) -> bool {
    if state.open_interface == Some(interface) {
        return true;
    }
    tracing::warn!(?action, ?interface, open = ?state.open_interface, "interface not open");
    false
}

/// Interact with a tile.
pub fn click_tile(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::ClickTile { x, y } = *action else {
        return mismatched(state, action);
    };
    interaction::click_tile(state, Tile::new(x, y), ctx)
}

/// Wear an inventory item.
pub fn equip(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Equip { index } = *action else {
        return mismatched(state, action);
    };
    let capacity = ctx.config.inventory_capacity;
    apply(
        state,
        action,
        |s| inventory::equip(&mut s.player, index, capacity),
        |s, name| s.log_game(format!("Equipped {name}")),
    )
}

/// Take off a worn item.
pub fn unequip(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Unequip { slot } = *action else {
        return mismatched(state, action);
    };
    let capacity = ctx.config.inventory_capacity;
    apply(
        state,
        action,
        |s| inventory::unequip(&mut s.player, slot, capacity),
        |s, name| s.log_game(format!("Unequipped {name}")),
    )
}

/// Drop an inventory stack on the player's tile.
pub fn drop(state: &WorldState, action: &Action, _ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Drop { index } = *action else {
        return mismatched(state, action);
    };
    apply(
        state,
        action,
        |s| inventory::drop(&mut s.player, index),
        |s, stack| {
            let tile = s.player.position;
            s.spawn_ground_item(tile, stack);
        },
    )
}

/// Bury bones for prayer experience.
pub fn bury(state: &WorldState, action: &Action, _ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Bury { index } = *action else {
        return mismatched(state, action);
    };
    apply(
        state,
        action,
        |s| inventory::bury(&mut s.player, index),
        |s, _| s.log_game("Buried bones"),
    )
}

/// Bank an inventory stack. Requires the bank to be open.
pub fn deposit(state: &WorldState, action: &Action, _ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Deposit { index } = *action else {
        return mismatched(state, action);
    };
    if !requires_interface(state, action, Interface::Bank) {
        return state.clone();
    }
    apply(state, action, |s| inventory::deposit(&mut s.player, index), |_, ()| {})
}

/// Withdraw a bank stack. Requires the bank to be open.
pub fn withdraw(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Withdraw { index } = *action else {
        return mismatched(state, action);
    };
    if !requires_interface(state, action, Interface::Bank) {
        return state.clone();
    }
    let capacity = ctx.config.inventory_capacity;
    apply(
        state,
        action,
        |s| inventory::withdraw(&mut s.player, index, capacity),
        |_, ()| {},
    )
}

/// Buy one unit from the shop. Requires the shop to be open.
pub fn buy(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Buy { item } = *action else {
        return mismatched(state, action);
    };
    if !requires_interface(state, action, Interface::Shop) {
        return state.clone();
    }
    let capacity = ctx.config.inventory_capacity;
    apply(
        state,
        action,
        |s| inventory::shop_buy(&mut s.player, item, capacity, &mut s.item_ids),
        |s, ()| s.log_game(format!("Bought {}.", item.name())),
    )
}

/// Sell an inventory stack. Requires the shop to be open.
pub fn sell(state: &WorldState, action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let Action::Sell { index } = *action else {
        return mismatched(state, action);
    };
    if !requires_interface(state, action, Interface::Shop) {
        return state.clone();
    }
    let Some(name) = state.player.inventory.get(index).map(|s| s.kind.name()) else {
        tracing::warn!(?action, "sell slot out of range");
        return state.clone();
    };
    let capacity = ctx.config.inventory_capacity;
    let ratio = ctx.config.sell_ratio;
    apply(
        state,
        action,
        |s| inventory::shop_sell(&mut s.player, index, ratio, capacity, &mut s.item_ids),
        |s, paid| s.log_game(format!("Sold {name} for {paid} coins.")),
    )
}

/// Close the open bank or shop.
pub fn close_interface(state: &WorldState, _action: &Action, _ctx: &mut DispatchContext<'_>) -> WorldState {
    let mut next = state.clone();
    next.open_interface = None;
    next
}

/// Advance the world by one tick.
pub fn tick(state: &WorldState, _action: &Action, ctx: &mut DispatchContext<'_>) -> WorldState {
    let mut next = state.clone();
    next.tick += 1;
    resolver::run_tick(&mut next, ctx);
    tracing::debug!(tick = next.tick, hp = next.player.hp, "tick");
    next
}
