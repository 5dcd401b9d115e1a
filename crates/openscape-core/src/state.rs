//! The world-state aggregate and its persisted subset.
//!
//! [`WorldState`] is the single value handed to consumers after every
//! dispatch. [`SaveData`] is the slice of it that survives a save/load cycle.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::entity::{EntityId, IdAllocator, Npc, Resource};
use crate::error::SaveError;
use crate::geometry::Tile;
use crate::item::{GroundItem, InstanceId, ItemKind, ItemStack};
use crate::player::Player;

// =============================================================================
// Messages and effects
// =============================================================================

/// Who a log message is addressed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Engine notices and rejections.
    System,
    /// In-world narration.
    Game,
}

/// One line of the player-facing message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Message text.
    pub text: String,
    /// Message kind.
    pub kind: MessageKind,
}

/// What a transient effect shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EffectKind {
    /// A landed hit, possibly for zero.
    Damage(u32),
    /// A missed attack.
    Miss,
    /// Experience gained.
    Experience(f64),
    /// Walk destination marker.
    Marker,
}

/// A short-lived feedback event. Never read by game logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientEffect {
    /// Tile the effect is drawn on.
    pub tile: Tile,
    /// What to draw.
    pub kind: EffectKind,
    /// Wall-clock creation time in milliseconds.
    pub created_at_ms: u64,
}

/// A modal opened by interacting with a bank booth or shopkeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    /// Bank deposit/withdraw.
    Bank,
    /// General store.
    Shop,
}

// =============================================================================
// WorldState
// =============================================================================

/// Root aggregate of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Tick counter, advanced only by the tick handler.
    pub tick: u64,
    /// The player.
    pub player: Player,
    /// Trees, rocks and bank booths.
    pub resources: Vec<Resource>,
    /// Enemies and shopkeepers.
    pub npcs: Vec<Npc>,
    /// Unowned stacks lying on tiles.
    pub ground_items: Vec<GroundItem>,
    /// Feedback events awaiting expiry.
    pub effects: Vec<TransientEffect>,
    /// Player-facing log, trimmed every tick.
    pub messages: Vec<LogEntry>,
    /// Modal the driver should display, if any.
    pub open_interface: Option<Interface>,
    /// Source of entity ids.
    pub entity_ids: IdAllocator,
    /// Source of item stack ids.
    pub item_ids: IdAllocator,
}

impl WorldState {
    /// Creates a state at tick 0 with the given player and nothing else.
    #[must_use]
    pub fn empty(player: Player, item_ids: IdAllocator) -> Self {
        Self {
            tick: 0,
            player,
            resources: Vec::new(),
            npcs: Vec::new(),
            ground_items: Vec::new(),
            effects: Vec::new(),
            messages: Vec::new(),
            open_interface: None,
            entity_ids: IdAllocator::default(),
            item_ids,
        }
    }

    /// Appends a system message.
    pub fn log_system(&mut self, text: impl Into<String>) {
        self.messages.push(LogEntry {
            text: text.into(),
            kind: MessageKind::System,
        });
    }

    /// Appends a game message.
    pub fn log_game(&mut self, text: impl Into<String>) {
        self.messages.push(LogEntry {
            text: text.into(),
            kind: MessageKind::Game,
        });
    }

    /// Drops all but the most recent `capacity` messages.
    pub fn trim_messages(&mut self, capacity: usize) {
        let excess = self.messages.len().saturating_sub(capacity);
        self.messages.drain(..excess);
    }

    /// Records a feedback effect.
    pub fn push_effect(&mut self, tile: Tile, kind: EffectKind, now_ms: u64) {
        self.effects.push(TransientEffect {
            tile,
            kind,
            created_at_ms: now_ms,
        });
    }

    /// Creates a fresh stack with a new instance id.
    pub fn new_stack(&mut self, kind: ItemKind, qty: u32) -> ItemStack {
        ItemStack::new(InstanceId::new(self.item_ids.allocate()), kind, qty)
    }

    /// Places `stack` on `tile`, merging into a stack of the same stackable
    /// item already lying there.
    pub fn spawn_ground_item(&mut self, tile: Tile, stack: ItemStack) {
        if stack.kind.is_stackable() {
            if let Some(existing) = self
                .ground_items
                .iter_mut()
                .find(|g| g.tile == tile && g.stack.kind == stack.kind)
            {
                existing.stack.qty = existing.stack.qty.saturating_add(stack.qty);
                return;
            }
        }
        self.ground_items.push(GroundItem { tile, stack });
    }

    /// Index of the npc with `id`.
    #[must_use]
    pub fn npc_index(&self, id: EntityId) -> Option<usize> {
        self.npcs.iter().position(|n| n.id == id)
    }

    /// Index of the resource with `id`.
    #[must_use]
    pub fn resource_index(&self, id: EntityId) -> Option<usize> {
        self.resources.iter().position(|r| r.id == id)
    }

    /// Position of the resource or npc with `id`, resources first.
    #[must_use]
    pub fn target_position(&self, id: EntityId) -> Option<Tile> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.position)
            .or_else(|| self.npcs.iter().find(|n| n.id == id).map(|n| n.position))
    }

    /// Extracts the persisted subset.
    #[must_use]
    pub fn to_save(&self) -> SaveData {
        SaveData {
            player: self.player.clone(),
            resources: self.resources.clone(),
            npcs: self.npcs.clone(),
            ground_items: self.ground_items.clone(),
        }
    }

    /// Rebuilds a state from saved data.
    ///
    /// The tick restarts at 0, effects are dropped and the log holds a single
    /// "Save loaded." notice. Id allocators resume past the highest saved id.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if entity ids repeat, the player's hp exceeds
    /// its maximum, the inventory is over capacity, a container repeats a
    /// stackable kind or a non-stackable item has a quantity other than one.
    pub fn from_save(save: SaveData, config: &SimConfig) -> Result<Self, SaveError> {
        let mut seen = HashSet::new();
        let entity_ids = save
            .resources
            .iter()
            .map(|r| r.id)
            .chain(save.npcs.iter().map(|n| n.id));
        for id in entity_ids {
            if !seen.insert(id) {
                return Err(SaveError::DuplicateEntity(id));
            }
        }

        let player = &save.player;
        if player.hp > player.max_hp {
            return Err(SaveError::InvalidHitpoints {
                hp: player.hp,
                max_hp: player.max_hp,
            });
        }
        if player.inventory.len() > config.inventory_capacity {
            return Err(SaveError::InventoryOverflow {
                len: player.inventory.len(),
                capacity: config.inventory_capacity,
            });
        }
        check_container("inventory", &player.inventory)?;
        check_container("bank", &player.bank)?;
        let worn = player.equipment.main_hand.iter().chain(player.equipment.off_hand.iter());
        check_quantities("equipment", worn)?;
        check_quantities("ground", save.ground_items.iter().map(|g| &g.stack))?;

        let next_entity = seen.iter().map(|id| id.as_u64()).max().unwrap_or(0) + 1;
        let next_item = player
            .inventory
            .iter()
            .chain(&player.bank)
            .chain(player.equipment.main_hand.iter())
            .chain(player.equipment.off_hand.iter())
            .chain(save.ground_items.iter().map(|g| &g.stack))
            .map(|s| s.instance.as_u64())
            .max()
            .unwrap_or(0)
            + 1;

        let mut state = Self {
            tick: 0,
            player: save.player,
            resources: save.resources,
            npcs: save.npcs,
            ground_items: save.ground_items,
            effects: Vec::new(),
            messages: Vec::new(),
            open_interface: None,
            entity_ids: IdAllocator::starting_at(next_entity),
            item_ids: IdAllocator::starting_at(next_item),
        };
        state.log_system("Save loaded.");
        Ok(state)
    }
}

fn check_container(container: &'static str, stacks: &[ItemStack]) -> Result<(), SaveError> {
    let mut kinds = HashSet::new();
    for stack in stacks.iter().filter(|s| s.kind.is_stackable()) {
        if !kinds.insert(stack.kind) {
            return Err(SaveError::DuplicateStack {
                container,
                name: stack.kind.name(),
            });
        }
    }
    check_quantities(container, stacks)
}

fn check_quantities<'a>(
    container: &'static str,
    stacks: impl IntoIterator<Item = &'a ItemStack>,
) -> Result<(), SaveError> {
    match stacks
        .into_iter()
        .find(|s| !s.kind.is_stackable() && s.qty != 1)
    {
        Some(stack) => Err(SaveError::InvalidQuantity {
            container,
            name: stack.kind.name(),
            qty: stack.qty,
        }),
        None => Ok(()),
    }
}

/// The persisted subset of a [`WorldState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// The player.
    pub player: Player,
    /// Resources, including their respawn state.
    pub resources: Vec<Resource>,
    /// Npcs, including their respawn state.
    pub npcs: Vec<Npc>,
    /// Items on the ground.
    pub ground_items: Vec<GroundItem>,
}
