//! Per-tick resolvers.
//!
//! A tick runs a fixed pipeline of resolvers against one owned copy of the
//! world state. The order is load-bearing: the player finishes moving before
//! combat range is checked, and an npc dies before maintenance counts down
//! its respawn.
//!
//! # Available Resolvers
//!
//! - [`MovementResolver`]: Consumes one path step and arms pending actions
//! - [`CombatResolver`]: One attack exchange, loot, retaliation and death
//! - [`SkillingResolver`]: Gathering rolls and resource depletion
//! - [`MaintenanceResolver`]: Regeneration, respawns, wandering and cleanup

mod combat;
mod maintenance;
mod movement;
mod skilling;

pub use combat::{calculate_hit, max_hit, roll_hit, AttackProfile, CombatResolver, DefenceProfile};
pub use maintenance::MaintenanceResolver;
pub use movement::MovementResolver;
pub use skilling::SkillingResolver;

use crate::dispatch::DispatchContext;
use crate::state::WorldState;

/// One stage of the tick pipeline.
///
/// Resolvers mutate the tick's working copy in place. They must draw random
/// numbers only from the context so that a seeded session replays exactly.
///
/// # Example
///
/// ```
/// use openscape_core::dispatch::DispatchContext;
/// use openscape_core::resolver::Resolver;
/// use openscape_core::state::WorldState;
///
/// struct Idle;
///
/// impl Resolver for Idle {
///     fn name(&self) -> &'static str {
///         "idle"
///     }
///
///     fn resolve(&self, _state: &mut WorldState, _ctx: &mut DispatchContext<'_>) {}
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Short name used in traces.
    fn name(&self) -> &'static str;

    /// Applies this stage to the working state.
    ///
    /// # Arguments
    ///
    /// * `state` - The tick's working copy
    /// * `ctx` - Terrain, configuration, random source and clock
    fn resolve(&self, state: &mut WorldState, ctx: &mut DispatchContext<'_>);
}

/// The tick pipeline, in execution order.
pub static TICK_PIPELINE: [&dyn Resolver; 4] = [
    &MovementResolver,
    &CombatResolver,
    &SkillingResolver,
    &MaintenanceResolver,
];

/// Runs every resolver of [`TICK_PIPELINE`] in order.
pub fn run_tick(state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
    for resolver in &TICK_PIPELINE {
        tracing::trace!(resolver = resolver.name(), tick = state.tick, "resolve");
        resolver.resolve(state, ctx);
    }
}
