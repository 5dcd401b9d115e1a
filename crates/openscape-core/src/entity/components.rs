//! Resource and npc state.
//!
//! Both kinds of entity share the same respawn shape: a status flag plus a
//! countdown in ticks that world maintenance decrements.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::geometry::Tile;

/// What a resource yields when interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Woodcutting target.
    Tree,
    /// Mining target.
    Rock,
    /// Bank booth.
    Bank,
}

/// Whether a resource can currently be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceStatus {
    /// Usable and colliding.
    Active,
    /// Waiting for its respawn timer.
    Depleted,
}

/// A static-position world object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique id.
    pub id: EntityId,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Tile the resource occupies.
    pub position: Tile,
    /// Current status.
    pub status: ResourceStatus,
    /// Ticks remaining until a depleted resource becomes active.
    pub respawn_timer: u32,
    /// Whether the resource blocks movement while active.
    pub collision: bool,
}

impl Resource {
    /// Creates an active, colliding resource.
    #[must_use]
    pub const fn new(id: EntityId, kind: ResourceKind, position: Tile) -> Self {
        Self {
            id,
            kind,
            position,
            status: ResourceStatus::Active,
            respawn_timer: 0,
            collision: true,
        }
    }

    /// Returns `true` while the resource is usable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ResourceStatus::Active
    }

    /// Marks the resource depleted for `ticks` ticks.
    pub fn deplete(&mut self, ticks: u32) {
        self.status = ResourceStatus::Depleted;
        self.respawn_timer = ticks;
    }

    /// Advances the respawn countdown by one tick.
    ///
    /// A depleted resource with an exhausted timer becomes active; otherwise
    /// the timer is decremented. Returns `true` if the resource became active
    /// on this tick.
    pub fn tick_respawn(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        if self.respawn_timer == 0 {
            self.status = ResourceStatus::Active;
            return true;
        }
        self.respawn_timer -= 1;
        false
    }
}

/// Behavioural category of an npc. Drives loot, AI and click handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcCategory {
    /// Attackable, wanders, drops loot.
    Enemy,
    /// Shopkeeper; clicking it walks to the shop.
    Shop,
}

/// Whether an npc is present in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcStatus {
    /// Present and interactable.
    Alive,
    /// Waiting for its respawn timer.
    Dead,
}

/// A non-player actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Unique id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Current tile.
    pub position: Tile,
    /// Current hitpoints, in `0..=max_hp`.
    pub hp: u32,
    /// Maximum hitpoints.
    pub max_hp: u32,
    /// Alive or dead.
    pub status: NpcStatus,
    /// Ticks remaining until a dead npc respawns.
    pub respawn_timer: u32,
    /// Defence level used in the block roll.
    pub defense: u32,
    /// Whether the npc blocks movement while alive.
    pub collision: bool,
    /// Behavioural category.
    pub category: NpcCategory,
}

impl Npc {
    /// Creates a non-colliding enemy.
    #[must_use]
    pub fn enemy(id: EntityId, name: impl Into<String>, position: Tile, hp: u32, defense: u32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            hp,
            max_hp: hp,
            status: NpcStatus::Alive,
            respawn_timer: 0,
            defense,
            collision: false,
            category: NpcCategory::Enemy,
        }
    }

    /// Creates a colliding shopkeeper.
    #[must_use]
    pub fn shopkeeper(id: EntityId, name: impl Into<String>, position: Tile) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            hp: 10,
            max_hp: 10,
            status: NpcStatus::Alive,
            respawn_timer: 0,
            defense: 0,
            collision: true,
            category: NpcCategory::Shop,
        }
    }

    /// Returns `true` while the npc is present.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == NpcStatus::Alive
    }

    /// Marks the npc dead with zero hp for `ticks` ticks.
    pub fn kill(&mut self, ticks: u32) {
        self.status = NpcStatus::Dead;
        self.hp = 0;
        self.respawn_timer = ticks;
    }

    /// Applies `damage`, killing the npc if its hp reaches zero.
    ///
    /// Returns `true` if this hit killed the npc.
    pub fn take_hit(&mut self, damage: u32, respawn_ticks: u32) -> bool {
        self.hp = self.hp.saturating_sub(damage);
        if self.hp == 0 {
            self.kill(respawn_ticks);
            return true;
        }
        false
    }

    /// Advances the respawn countdown by one tick.
    ///
    /// Returns `true` once the timer is already exhausted on entry, in which
    /// case the caller relocates the npc and calls [`revive`](Self::revive).
    pub fn tick_respawn(&mut self) -> bool {
        if self.is_alive() {
            return false;
        }
        if self.respawn_timer == 0 {
            return true;
        }
        self.respawn_timer -= 1;
        false
    }

    /// Brings the npc back at full hp on `position`.
    pub fn revive(&mut self, position: Tile) {
        self.status = NpcStatus::Alive;
        self.hp = self.max_hp;
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod resource_tests {
        use super::*;

        #[test]
        fn respawns_after_exactly_the_timer() {
            let mut rock = Resource::new(EntityId::new(1), ResourceKind::Rock, Tile::new(0, 0));
            rock.deplete(10);
            for _ in 0..10 {
                assert!(!rock.tick_respawn());
                assert!(!rock.is_active());
            }
            assert_eq!(rock.respawn_timer, 0);
            assert!(rock.tick_respawn());
            assert!(rock.is_active());
        }

        #[test]
        fn active_resource_ignores_ticks() {
            let mut tree = Resource::new(EntityId::new(1), ResourceKind::Tree, Tile::new(0, 0));
            assert!(!tree.tick_respawn());
            assert_eq!(tree.respawn_timer, 0);
        }
    }

    mod npc_tests {
        use super::*;

        fn goblin() -> Npc {
            Npc::enemy(EntityId::new(1), "Goblin", Tile::new(5, 5), 5, 1)
        }

        #[test]
        fn constructors_set_category_and_collision() {
            let g = goblin();
            assert_eq!(g.category, NpcCategory::Enemy);
            assert!(!g.collision);
            assert_eq!(g.hp, g.max_hp);

            let shop = Npc::shopkeeper(EntityId::new(2), "Merchant", Tile::new(1, 1));
            assert_eq!(shop.category, NpcCategory::Shop);
            assert!(shop.collision);
        }

        #[test]
        fn take_hit_clamps_and_kills() {
            let mut g = goblin();
            assert!(!g.take_hit(3, 15));
            assert_eq!(g.hp, 2);
            assert!(g.take_hit(4, 15));
            assert_eq!(g.hp, 0);
            assert_eq!(g.status, NpcStatus::Dead);
            assert_eq!(g.respawn_timer, 15);
        }

        #[test]
        fn zero_damage_does_not_kill() {
            let mut g = goblin();
            assert!(!g.take_hit(0, 15));
            assert!(g.is_alive());
        }

        #[test]
        fn respawn_countdown_then_revive() {
            let mut g = goblin();
            g.kill(2);
            assert!(!g.tick_respawn());
            assert!(!g.tick_respawn());
            assert!(g.tick_respawn());
            g.revive(Tile::new(9, 9));
            assert!(g.is_alive());
            assert_eq!(g.hp, 5);
            assert_eq!(g.position, Tile::new(9, 9));
        }
    }
}
