//! World generation.
//!
//! Builds the starting world: a bank booth next to the spawn, a shopkeeper,
//! trees, rocks and goblins scattered over the spawn area.

use rand::{Rng, RngCore};

use crate::config::SimConfig;
use crate::entity::{EntityId, IdAllocator, Npc, Resource, ResourceKind};
use crate::geometry::{is_blocked, Tile};
use crate::player::Player;
use crate::state::WorldState;
use crate::terrain::Terrain;

/// Tile of the bank booth.
pub const BANK_TILE: Tile = Tile::new(10, 10);

/// Tile of the general store's shopkeeper.
pub const SHOP_TILE: Tile = Tile::new(14, 10);

/// Number of trees and, separately, of rocks.
pub const RESOURCE_COUNT: usize = 40;

/// Number of goblins.
pub const GOBLIN_COUNT: usize = 8;

/// Goblin hitpoints.
pub const GOBLIN_HP: u32 = 5;

/// Goblin defence stat.
pub const GOBLIN_DEFENSE: u32 = 1;

/// Attempts made to find an unblocked random tile before settling.
const PLACEMENT_ATTEMPTS: usize = 8;

/// A uniformly random tile inside the configured spawn area.
pub fn random_tile(rng: &mut dyn RngCore, config: &SimConfig) -> Tile {
    let (min, max) = (config.spawn_area_min, config.spawn_area_max);
    if max <= min {
        return Tile::new(min, min);
    }
    let x = rng.gen_range(min..max);
    let y = rng.gen_range(min..max);
    Tile::new(x, y)
}

/// A random spawn-area tile, preferring unblocked ones.
///
/// Falls back to the last sample when every attempt lands on a blocked tile.
pub fn random_free_tile(
    rng: &mut dyn RngCore,
    config: &SimConfig,
    terrain: &Terrain,
    resources: &[Resource],
    npcs: &[Npc],
) -> Tile {
    let mut tile = random_tile(rng, config);
    for _ in 1..PLACEMENT_ATTEMPTS {
        if !is_blocked(tile, terrain, resources, npcs) {
            break;
        }
        tile = random_tile(rng, config);
    }
    tile
}

/// Builds the starting world state.
///
/// # Arguments
///
/// * `config` - Spawn tile, spawn area and inventory settings
/// * `terrain` - Terrain used to avoid placing things on walls
/// * `rng` - Random source for placement
pub fn new_world(config: &SimConfig, terrain: &Terrain, rng: &mut dyn RngCore) -> WorldState {
    let mut item_ids = IdAllocator::default();
    let player = Player::starting(config.spawn_tile, &mut item_ids);
    let mut state = WorldState::empty(player, item_ids);

    let bank = next_entity(&mut state);
    state.resources.push(Resource::new(bank, ResourceKind::Bank, BANK_TILE));

    for _ in 0..RESOURCE_COUNT {
        for kind in [ResourceKind::Tree, ResourceKind::Rock] {
            let tile = placement_tile(&state, config, terrain, rng);
            let id = next_entity(&mut state);
            state.resources.push(Resource::new(id, kind, tile));
        }
    }

    let merchant = next_entity(&mut state);
    state.npcs.push(Npc::shopkeeper(merchant, "Merchant", SHOP_TILE));

    for _ in 0..GOBLIN_COUNT {
        let tile = placement_tile(&state, config, terrain, rng);
        let id = next_entity(&mut state);
        state
            .npcs
            .push(Npc::enemy(id, "Goblin", tile, GOBLIN_HP, GOBLIN_DEFENSE));
    }

    state.log_system("Engine initialized.");
    tracing::debug!(
        resources = state.resources.len(),
        npcs = state.npcs.len(),
        "world generated"
    );
    state
}

fn next_entity(state: &mut WorldState) -> EntityId {
    EntityId::new(state.entity_ids.allocate())
}

/// Random free tile that also keeps clear of the player's spawn.
fn placement_tile(state: &WorldState, config: &SimConfig, terrain: &Terrain, rng: &mut dyn RngCore) -> Tile {
    let mut tile = random_free_tile(rng, config, terrain, &state.resources, &state.npcs);
    for _ in 1..PLACEMENT_ATTEMPTS {
        if tile != config.spawn_tile {
            break;
        }
        tile = random_free_tile(rng, config, terrain, &state.resources, &state.npcs);
    }
    tile
}
