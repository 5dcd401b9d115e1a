//! Simulation configuration.
//!
//! [`SimConfig`] collects every tunable constant the simulation reads. The
//! defaults reproduce the shipped game balance; a driver may load an override
//! from any serde format.

use serde::{Deserialize, Serialize};

use crate::geometry::Tile;

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width and height of the generated square map, in tiles.
    pub map_size: i32,
    /// Wall-clock interval between ticks in milliseconds.
    pub tick_rate_ms: u64,
    /// Number of inventory slots.
    pub inventory_capacity: usize,
    /// Number of log messages retained.
    pub message_capacity: usize,
    /// Tile the player starts on and returns to after death.
    pub spawn_tile: Tile,
    /// Maximum Manhattan distance at which the player can interact.
    pub interaction_range: f64,
    /// Dequeue ceiling for a single path search.
    pub path_iteration_limit: usize,
    /// Ticks a dead npc waits before respawning.
    pub npc_respawn_ticks: u32,
    /// Ticks a depleted resource waits before becoming active again.
    pub resource_respawn_ticks: u32,
    /// Passive regeneration heals one hitpoint every this many ticks.
    pub regen_interval: u64,
    /// Per-tick chance that an idle enemy takes a wander step.
    pub wander_chance: f64,
    /// Chance that an enemy lands its retaliation hit.
    pub retaliation_chance: f64,
    /// Chance that a resource depletes after a successful gather.
    pub depletion_chance: f64,
    /// Age in milliseconds after which transient effects are dropped.
    pub effect_lifetime_ms: u64,
    /// Fraction of an item's value paid out when selling it.
    pub sell_ratio: f64,
    /// Lower bound (inclusive) of the random spawn area, both axes.
    pub spawn_area_min: i32,
    /// Upper bound (exclusive) of the random spawn area, both axes.
    pub spawn_area_max: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_size: 50,
            tick_rate_ms: 600,
            inventory_capacity: 20,
            message_capacity: 15,
            spawn_tile: Tile::new(12, 12),
            interaction_range: 1.5,
            path_iteration_limit: 2000,
            npc_respawn_ticks: 15,
            resource_respawn_ticks: 10,
            regen_interval: 20,
            wander_chance: 0.05,
            retaliation_chance: 0.4,
            depletion_chance: 0.5,
            effect_lifetime_ms: 1000,
            sell_ratio: 0.4,
            spawn_area_min: 5,
            spawn_area_max: 45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_balance() {
        let config = SimConfig::default();
        assert_eq!(config.inventory_capacity, 20);
        assert_eq!(config.message_capacity, 15);
        assert_eq!(config.spawn_tile, Tile::new(12, 12));
        assert_eq!(config.npc_respawn_ticks, 15);
        assert_eq!(config.resource_respawn_ticks, 10);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"tick_rate_ms": 100}"#).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.map_size, 50);
    }

    #[test]
    fn serialization_roundtrip() {
        let config = SimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
