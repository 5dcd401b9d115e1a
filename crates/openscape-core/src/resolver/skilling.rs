//! Skilling resolver.
//!
//! While the player's active action is [`PlayerAction::Skilling`], each tick
//! rolls `0.2 + level / 200` for a successful gather. A success yields one
//! item and its experience, then a further roll may deplete the resource.

use rand::Rng;

use crate::dispatch::DispatchContext;
use crate::inventory::{add_item, has_room_for};
use crate::player::PlayerAction;
use crate::state::{EffectKind, WorldState};

use super::Resolver;

/// Base chance of a successful gather at any level.
pub const BASE_GATHER_CHANCE: f64 = 0.2;

/// Chance of a successful gather at `level`.
#[must_use]
pub fn gather_chance(level: u32) -> f64 {
    BASE_GATHER_CHANCE + f64::from(level) / 200.0
}

/// Resolver for gathering from trees and rocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillingResolver;

impl Resolver for SkillingResolver {
    fn name(&self) -> &'static str {
        "skilling"
    }

    fn resolve(&self, state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
        let Some(PlayerAction::Skilling { target, skill }) = state.player.action else {
            return;
        };
        let Some(index) = state
            .resource_index(target)
            .filter(|&i| state.resources[i].is_active())
        else {
            state.player.action = None;
            return;
        };
        let Some(item) = skill.gathered_item() else {
            state.player.action = None;
            return;
        };

        if ctx.rng.gen::<f64>() >= gather_chance(state.player.level(skill)) {
            return;
        }

        let capacity = ctx.config.inventory_capacity;
        if !has_room_for(&state.player.inventory, item, Some(capacity)) {
            state.player.action = None;
            state.log_system("Inventory full");
            return;
        }

        add_item(&mut state.player.inventory, item, 1, Some(capacity), &mut state.item_ids);
        let xp = item.template().xp;
        state.player.skills.add_xp(skill, xp);
        let tile = state.player.position;
        state.push_effect(tile, EffectKind::Experience(xp), ctx.now_ms);
        tracing::trace!(?skill, %item, "gathered");

        if ctx.rng.gen::<f64>() < ctx.config.depletion_chance {
            state.resources[index].deplete(ctx.config.resource_respawn_ticks);
            state.player.action = None;
        }
    }
}
