//! # OpenScape Core
//!
//! Tick-based world simulation for a small tile-grid RPG.
//!
//! A single player walks a grid, fights goblins, chops trees, mines rocks,
//! banks and trades. All change flows through one dispatcher: external input
//! and the clock tick are both [`Action`]s, and every dispatch turns the
//! current [`WorldState`] into a new one.
//!
//! ## Architecture
//!
//! - **State**: [`WorldState`] snapshot of player, resources, npcs, ground
//!   items, effects and the message log
//! - **Dispatch**: [`Dispatcher`] maps each action kind to a pure handler
//! - **Resolvers**: the tick runs movement, combat, skilling and maintenance
//!   in that order
//! - **Session**: [`Session`] owns the state, terrain and a seeded random
//!   source
//!
//! ## Usage
//!
//! ```
//! use openscape_core::{Action, Session, SimConfig};
//!
//! let mut session = Session::new(SimConfig::default(), 42);
//! session.submit(Action::Equip { index: 0 }, 0);
//! session.step(600);
//!
//! assert!(session.state().player.inventory.is_empty());
//! assert_eq!(session.tick(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod loot;
pub mod pathfinding;
pub mod player;
pub mod resolver;
pub mod session;
pub mod state;
pub mod terrain;
pub mod world;

// Re-exports for convenience
pub use config::SimConfig;
pub use dispatch::{Action, ActionKind, DispatchContext, Dispatcher, Handler};
pub use entity::{EntityId, Npc, Resource};
pub use error::{InventoryError, SaveError, TerrainError};
pub use geometry::Tile;
pub use item::{ItemKind, ItemStack};
pub use player::{Player, PlayerAction, Skill};
pub use session::Session;
pub use state::{SaveData, WorldState};
pub use terrain::Terrain;

#[cfg(test)]
mod tests;
