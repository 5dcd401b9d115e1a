//! Movement resolver.
//!
//! Each tick the player takes at most one step. A step that has become
//! blocked since the path was computed cancels the rest of the walk. Once
//! the queue is empty, a pending action is either armed (target within
//! interaction range) or dropped, and a pending shop opens when its keeper
//! is in reach.

use crate::dispatch::DispatchContext;
use crate::entity::EntityId;
use crate::geometry::{is_blocked, within_range};
use crate::player::PlayerAction;
use crate::state::{Interface, WorldState};

use super::Resolver;

/// Resolver for path steps and arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementResolver;

impl Resolver for MovementResolver {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn resolve(&self, state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
        if let Some(step) = state.player.path_queue.pop_front() {
            if is_blocked(step, ctx.terrain, &state.resources, &state.npcs) {
                state.player.path_queue.clear();
                state.log_system("Path blocked.");
            } else {
                state.player.position = step;
            }
        }

        if !state.player.path_queue.is_empty() {
            return;
        }

        let range = ctx.config.interaction_range;
        if let Some(shop) = state.player.pending_shop.take() {
            if in_reach(state, shop, range) {
                state.open_interface = Some(Interface::Shop);
            }
        }

        let Some(pending) = state.player.pending_action.take() else {
            return;
        };
        if in_reach(state, pending.target(), range) {
            state.player.action = Some(pending);
            if matches!(pending, PlayerAction::Banking { .. }) {
                state.open_interface = Some(Interface::Bank);
            }
        } else {
            tracing::trace!(entity = %pending.target(), "pending action dropped");
        }
    }
}

fn in_reach(state: &WorldState, target: EntityId, range: f64) -> bool {
    state
        .target_position(target)
        .is_some_and(|pos| within_range(state.player.position, pos, range))
}
