//! Test helper functions for building small worlds and driving them.
//!
//! The [`Harness`] wraps a hand-built [`WorldState`] on an open grid together
//! with a dispatcher and a random source, so scenario tests read as a list of
//! clicks and ticks.

use rand::rngs::mock::StepRng;
use rand::RngCore;

use crate::config::SimConfig;
use crate::dispatch::{Action, DispatchContext, Dispatcher};
use crate::entity::{EntityId, IdAllocator, Npc, Resource, ResourceKind};
use crate::geometry::Tile;
use crate::item::ItemKind;
use crate::player::Player;
use crate::state::WorldState;
use crate::terrain::Terrain;

// =============================================================================
// Configuration
// =============================================================================

/// Default configuration with idle wandering switched off.
///
/// Keeps npcs where a test put them while the player walks.
pub fn quiet_config() -> SimConfig {
    SimConfig {
        wander_chance: 0.0,
        ..SimConfig::default()
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A world under test plus everything needed to dispatch into it.
pub struct Harness {
    /// Static terrain.
    pub terrain: Terrain,
    /// Configuration passed to every dispatch.
    pub config: SimConfig,
    /// Handler registry.
    pub dispatcher: Dispatcher,
    /// Current state.
    pub state: WorldState,
    /// Random source. Defaults to a `StepRng` that always yields zero.
    pub rng: Box<dyn RngCore>,
    /// Clock passed to the next dispatch.
    pub now_ms: u64,
}

impl Harness {
    /// A 20x20 open grid with the starting player at `player_at`.
    pub fn new(player_at: Tile) -> Self {
        let mut item_ids = IdAllocator::default();
        let player = Player::starting(player_at, &mut item_ids);
        Self {
            terrain: Terrain::open(20, 20),
            config: quiet_config(),
            dispatcher: Dispatcher::with_default_handlers(),
            state: WorldState::empty(player, item_ids),
            rng: Box::new(StepRng::new(0, 0)),
            now_ms: 0,
        }
    }

    /// Replaces the random source.
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replaces the terrain.
    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    /// Dispatches one action and keeps the result.
    pub fn send(&mut self, action: Action) -> &WorldState {
        let mut ctx = DispatchContext::new(&self.terrain, &self.config, &mut *self.rng, self.now_ms);
        self.state = self.dispatcher.dispatch(&self.state, &action, &mut ctx);
        &self.state
    }

    /// Clicks the tile at `(x, y)`.
    pub fn click(&mut self, x: i32, y: i32) -> &WorldState {
        self.send(Action::ClickTile { x, y })
    }

    /// Runs `n` ticks, advancing the clock by the tick rate each time.
    pub fn ticks(&mut self, n: usize) -> &WorldState {
        for _ in 0..n {
            self.now_ms += self.config.tick_rate_ms;
            self.send(Action::Tick);
        }
        &self.state
    }

    fn next_id(&mut self) -> EntityId {
        EntityId::new(self.state.entity_ids.allocate())
    }

    /// Places a resource and returns its id.
    pub fn add_resource(&mut self, kind: ResourceKind, tile: Tile) -> EntityId {
        let id = self.next_id();
        self.state.resources.push(Resource::new(id, kind, tile));
        id
    }

    /// Places a goblin (hp 5, defence 1) and returns its id.
    pub fn add_goblin(&mut self, tile: Tile) -> EntityId {
        let id = self.next_id();
        self.state.npcs.push(Npc::enemy(id, "Goblin", tile, 5, 1));
        id
    }

    /// Places a shopkeeper and returns its id.
    pub fn add_shopkeeper(&mut self, tile: Tile) -> EntityId {
        let id = self.next_id();
        self.state.npcs.push(Npc::shopkeeper(id, "Merchant", tile));
        id
    }

    /// Gives the player a stack of `qty` coins.
    pub fn give_coins(&mut self, qty: u32) {
        let coins = self.state.new_stack(ItemKind::Coins, qty);
        self.state.player.inventory.push(coins);
    }

    /// Fills the inventory to capacity with logs.
    pub fn fill_inventory(&mut self) {
        while self.state.player.inventory.len() < self.config.inventory_capacity {
            let logs = self.state.new_stack(ItemKind::Logs, 1);
            self.state.player.inventory.push(logs);
        }
    }

    /// Text of the newest log message.
    pub fn last_message(&self) -> Option<&str> {
        self.state.messages.last().map(|m| m.text.as_str())
    }

    /// Returns `true` if any retained message has exactly this text.
    pub fn has_message(&self, text: &str) -> bool {
        self.state.messages.iter().any(|m| m.text == text)
    }

    /// Number of inventory stacks of `kind`.
    pub fn count(&self, kind: ItemKind) -> usize {
        self.state
            .player
            .inventory
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    }
}
