//! World maintenance, the last stage of every tick.
//!
//! - Passive regeneration of one hitpoint every `regen_interval` ticks
//! - Resource and npc respawn countdowns
//! - Idle wandering of enemies the player is not fighting
//! - Expiry of transient effects and trimming of the message log

use glam::IVec2;
use rand::Rng;

use crate::dispatch::DispatchContext;
use crate::entity::NpcCategory;
use crate::geometry::is_blocked;
use crate::state::WorldState;
use crate::world::random_free_tile;

use super::Resolver;

/// Resolver for timers, idle AI and cleanup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceResolver;

impl MaintenanceResolver {
    fn regenerate(state: &mut WorldState, ctx: &DispatchContext<'_>) {
        let interval = ctx.config.regen_interval;
        if interval > 0 && state.tick % interval == 0 && state.player.hp < state.player.max_hp {
            state.player.hp += 1;
        }
    }

    fn respawn_resources(state: &mut WorldState) {
        for resource in &mut state.resources {
            if resource.tick_respawn() {
                tracing::trace!(resource = %resource.id, "resource respawned");
            }
        }
    }

    fn update_npcs(state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
        let fighting = state.player.action.map(|a| a.target());

        for i in 0..state.npcs.len() {
            if !state.npcs[i].is_alive() {
                if state.npcs[i].tick_respawn() {
                    let tile = random_free_tile(ctx.rng, ctx.config, ctx.terrain, &state.resources, &state.npcs);
                    state.npcs[i].revive(tile);
                    tracing::trace!(npc = %state.npcs[i].id, ?tile, "npc respawned");
                }
                continue;
            }

            let npc = &state.npcs[i];
            if npc.category != NpcCategory::Enemy || fighting == Some(npc.id) {
                continue;
            }
            if ctx.rng.gen::<f64>() >= ctx.config.wander_chance {
                continue;
            }
            let dx = if ctx.rng.gen::<bool>() { 1 } else { -1 };
            let dy = if ctx.rng.gen::<bool>() { 1 } else { -1 };
            let destination = npc.position + IVec2::new(dx, dy);
            if !is_blocked(destination, ctx.terrain, &state.resources, &state.npcs) {
                state.npcs[i].position = destination;
            }
        }
    }
}

impl Resolver for MaintenanceResolver {
    fn name(&self) -> &'static str {
        "maintenance"
    }

    fn resolve(&self, state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
        Self::regenerate(state, ctx);
        Self::respawn_resources(state);
        Self::update_npcs(state, ctx);

        let now = ctx.now_ms;
        let lifetime = ctx.config.effect_lifetime_ms;
        state
            .effects
            .retain(|e| now.saturating_sub(e.created_at_ms) < lifetime);
        state.trim_messages(ctx.config.message_capacity);
    }
}
