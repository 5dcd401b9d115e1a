//! Grid geometry, level curve and collision helpers.
//!
//! Everything here is a pure function of its arguments.

use std::sync::OnceLock;

use glam::IVec2;

use crate::entity::{Npc, Resource};
use crate::terrain::Terrain;

/// A grid coordinate. `x` grows to the right, `y` grows downwards.
pub type Tile = IVec2;

/// Neighbour offsets in expansion order: up, down, left, right.
pub const CARDINAL_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
];

/// Highest attainable skill level.
pub const MAX_LEVEL: u32 = 99;

/// Manhattan distance between two tiles.
#[must_use]
pub fn distance(a: Tile, b: Tile) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Returns `true` if `b` is within `range` of `a` by Manhattan distance.
#[must_use]
pub fn within_range(a: Tile, b: Tile, range: f64) -> bool {
    f64::from(distance(a, b)) <= range
}

/// Experience needed to reach each level; index 0 is level 1.
fn level_thresholds() -> &'static [f64] {
    static THRESHOLDS: OnceLock<Vec<f64>> = OnceLock::new();
    THRESHOLDS.get_or_init(|| {
        let mut points = 0.0_f64;
        let mut table = Vec::with_capacity(MAX_LEVEL as usize);
        table.push(0.0);
        for level in 1..MAX_LEVEL {
            let level = f64::from(level);
            points += (level + 300.0 * 2.0_f64.powf(level / 7.0)).floor();
            table.push((points / 4.0).floor());
        }
        table
    })
}

/// Minimum experience for `level`, clamped to `1..=99`.
#[must_use]
pub fn xp_for_level(level: u32) -> f64 {
    let index = level.clamp(1, MAX_LEVEL) - 1;
    level_thresholds()[index as usize]
}

/// Derives a skill level from accumulated experience.
///
/// Level 1 starts at 0 xp, level 2 at 83 xp, level 10 at 1154 xp.
#[must_use]
pub fn level_from_xp(xp: f64) -> u32 {
    let reached = level_thresholds().iter().take_while(|&&t| t <= xp).count();
    #[allow(clippy::cast_possible_truncation)]
    let level = reached as u32;
    level.clamp(1, MAX_LEVEL)
}

/// Returns `true` if nothing may stand on `tile`.
///
/// A tile is blocked when it is out of bounds, impassable terrain, occupied
/// by an active colliding resource, or occupied by a living colliding npc.
#[must_use]
pub fn is_blocked(tile: Tile, terrain: &Terrain, resources: &[Resource], npcs: &[Npc]) -> bool {
    if !terrain.is_passable(tile) {
        return true;
    }
    if resources
        .iter()
        .any(|r| r.position == tile && r.collision && r.is_active())
    {
        return true;
    }
    npcs.iter()
        .any(|n| n.position == tile && n.collision && n.is_alive())
}
