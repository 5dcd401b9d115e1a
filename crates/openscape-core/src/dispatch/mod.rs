//! Action dispatch.
//!
//! The [`Dispatcher`] is the single entry point through which external input
//! and the tick itself change the world. It maps each [`ActionKind`] to a
//! pure [`Handler`] that reads the current state and returns the next one.
//!
//! # Architecture
//!
//! - [`Action`]: closed set of requests with their payloads
//! - [`DispatchContext`]: read-only environment plus the injected random source
//! - [`Dispatcher`]: registry from action kind to handler
//!
//! Handlers never mutate the state they are given; each builds the next state
//! from an owned copy.
//!
//! # Example
//!
//! ```
//! use openscape_core::config::SimConfig;
//! use openscape_core::dispatch::{Action, DispatchContext, Dispatcher};
//! use openscape_core::terrain::Terrain;
//! use openscape_core::world;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = SimConfig::default();
//! let terrain = Terrain::generate(config.map_size);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let state = world::new_world(&config, &terrain, &mut rng);
//!
//! let dispatcher = Dispatcher::with_default_handlers();
//! let mut ctx = DispatchContext::new(&terrain, &config, &mut rng, 0);
//! let next = dispatcher.dispatch(&state, &Action::Tick, &mut ctx);
//! assert_eq!(next.tick, state.tick + 1);
//! ```

pub mod handlers;

use std::collections::HashMap;
use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::item::{EquipSlot, ItemKind};
use crate::state::WorldState;
use crate::terrain::Terrain;

// =============================================================================
// Actions
// =============================================================================

/// Discriminant of an [`Action`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Interact with a tile.
    ClickTile,
    /// Wear an inventory item.
    Equip,
    /// Take off a worn item.
    Unequip,
    /// Drop an inventory item on the player's tile.
    Drop,
    /// Bury bones.
    Bury,
    /// Move an inventory stack into the bank.
    Deposit,
    /// Move a bank stack into the inventory.
    Withdraw,
    /// Buy one unit from the shop.
    Buy,
    /// Sell an inventory stack to the shop.
    Sell,
    /// Close the open bank or shop.
    CloseInterface,
    /// Advance the world by one step.
    Tick,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [Self; 11] = [
        Self::ClickTile,
        Self::Equip,
        Self::Unequip,
        Self::Drop,
        Self::Bury,
        Self::Deposit,
        Self::Withdraw,
        Self::Buy,
        Self::Sell,
        Self::CloseInterface,
        Self::Tick,
    ];
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A discrete request submitted to the [`Dispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Interact with the tile at `(x, y)`.
    ClickTile {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Wear the inventory item at `index`.
    Equip {
        /// Inventory slot.
        index: usize,
    },
    /// Take off the item in `slot`.
    Unequip {
        /// Equipment slot.
        slot: EquipSlot,
    },
    /// Drop the inventory stack at `index`.
    Drop {
        /// Inventory slot.
        index: usize,
    },
    /// Bury the bones at `index`.
    Bury {
        /// Inventory slot.
        index: usize,
    },
    /// Bank the inventory stack at `index`.
    Deposit {
        /// Inventory slot.
        index: usize,
    },
    /// Withdraw the bank stack at `index`.
    Withdraw {
        /// Bank slot.
        index: usize,
    },
    /// Buy one `item` from the shop.
    Buy {
        /// Item to buy.
        item: ItemKind,
    },
    /// Sell the inventory stack at `index`.
    Sell {
        /// Inventory slot.
        index: usize,
    },
    /// Close the open interface.
    CloseInterface,
    /// Advance one tick.
    Tick,
}

impl Action {
    /// Returns the registry key of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::ClickTile { .. } => ActionKind::ClickTile,
            Self::Equip { .. } => ActionKind::Equip,
            Self::Unequip { .. } => ActionKind::Unequip,
            Self::Drop { .. } => ActionKind::Drop,
            Self::Bury { .. } => ActionKind::Bury,
            Self::Deposit { .. } => ActionKind::Deposit,
            Self::Withdraw { .. } => ActionKind::Withdraw,
            Self::Buy { .. } => ActionKind::Buy,
            Self::Sell { .. } => ActionKind::Sell,
            Self::CloseInterface => ActionKind::CloseInterface,
            Self::Tick => ActionKind::Tick,
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// Environment handed to every handler and resolver.
///
/// Holds data that is not part of the world state: the static terrain, the
/// configuration, the random source and the wall-clock time of the call.
pub struct DispatchContext<'a> {
    /// Static terrain grid.
    pub terrain: &'a Terrain,
    /// Simulation configuration.
    pub config: &'a SimConfig,
    /// Random source for every probabilistic rule.
    pub rng: &'a mut dyn RngCore,
    /// Wall-clock time in milliseconds, used to stamp and expire effects.
    pub now_ms: u64,
}

impl<'a> DispatchContext<'a> {
    /// Creates a context.
    pub fn new(
        terrain: &'a Terrain,
        config: &'a SimConfig,
        rng: &'a mut dyn RngCore,
        now_ms: u64,
    ) -> Self {
        Self {
            terrain,
            config,
            rng,
            now_ms,
        }
    }
}

impl fmt::Debug for DispatchContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchContext")
            .field("terrain", &format!("{}x{}", self.terrain.width(), self.terrain.height()))
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// A pure state transition: `(state, action, context) -> next state`.
pub type Handler = fn(&WorldState, &Action, &mut DispatchContext<'_>) -> WorldState;

/// Registry from action kind to handler.
///
/// # Example
///
/// ```
/// use openscape_core::dispatch::{ActionKind, Dispatcher};
///
/// let dispatcher = Dispatcher::with_default_handlers();
/// for kind in ActionKind::ALL {
///     assert!(dispatcher.handles(kind));
/// }
/// assert!(!Dispatcher::new().handles(ActionKind::Tick));
/// ```
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<ActionKind, Handler>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort_by_key(|k| k.to_string());
        f.debug_struct("Dispatcher").field("handlers", &kinds).finish()
    }
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with the built-in handler for every action kind.
    #[must_use]
    pub fn with_default_handlers() -> Self {
        let mut dispatcher = Self::new();
        for kind in ActionKind::ALL {
            dispatcher.register(kind, default_handler(kind));
        }
        dispatcher
    }

    /// Binds `handler` to `kind`, replacing any previous binding.
    ///
    /// # Arguments
    ///
    /// * `kind` - Action kind to handle
    /// * `handler` - Transition function
    pub fn register(&mut self, kind: ActionKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Returns `true` if a handler is bound to `kind`.
    #[must_use]
    pub fn handles(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Runs the handler registered for the action's kind.
    ///
    /// An unregistered kind is not an error: a warning is logged for the
    /// operator and an unchanged copy of `state` is returned.
    #[must_use]
    pub fn dispatch(
        &self,
        state: &WorldState,
        action: &Action,
        ctx: &mut DispatchContext<'_>,
    ) -> WorldState {
        let kind = action.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            tracing::warn!(%kind, "no handler registered");
            return state.clone();
        };
        tracing::debug!(?action, tick = state.tick, "dispatch");
        handler(state, action, ctx)
    }
}

/// Built-in handler for `kind`.
///
/// The match is exhaustive, so adding an action kind without a handler fails
/// to compile.
#[must_use]
pub fn default_handler(kind: ActionKind) -> Handler {
    match kind {
        ActionKind::ClickTile => handlers::click_tile,
        ActionKind::Equip => handlers::equip,
        ActionKind::Unequip => handlers::unequip,
        ActionKind::Drop => handlers::drop,
        ActionKind::Bury => handlers::bury,
        ActionKind::Deposit => handlers::deposit,
        ActionKind::Withdraw => handlers::withdraw,
        ActionKind::Buy => handlers::buy,
        ActionKind::Sell => handlers::sell,
        ActionKind::CloseInterface => handlers::close_interface,
        ActionKind::Tick => handlers::tick,
    }
}
