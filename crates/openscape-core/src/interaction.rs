//! Tile-click resolution.
//!
//! A click targets at most one thing. Living npcs win over active resources,
//! and ground items are only picked up when neither is on the tile. Npcs and
//! resources are approached from the nearest free cardinal neighbour, never
//! from their own tile.

use crate::dispatch::DispatchContext;
use crate::entity::{EntityId, NpcCategory, ResourceKind};
use crate::geometry::{distance, is_blocked, Tile, CARDINAL_OFFSETS};
use crate::inventory;
use crate::pathfinding::find_path;
use crate::player::{PlayerAction, Skill};
use crate::state::{EffectKind, Interface, WorldState};

/// What a clicked tile holds, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    Npc { id: EntityId, category: NpcCategory },
    Resource { id: EntityId, kind: ResourceKind },
    Ground,
}

impl ClickTarget {
    fn at(state: &WorldState, tile: Tile) -> Self {
        if let Some(npc) = state.npcs.iter().find(|n| n.position == tile && n.is_alive()) {
            return Self::Npc {
                id: npc.id,
                category: npc.category,
            };
        }
        if let Some(resource) = state
            .resources
            .iter()
            .find(|r| r.position == tile && r.is_active())
        {
            return Self::Resource {
                id: resource.id,
                kind: resource.kind,
            };
        }
        Self::Ground
    }

    /// Action armed on arrival. Shopkeepers arm nothing.
    const fn pending_action(self) -> Option<PlayerAction> {
        match self {
            Self::Npc {
                id,
                category: NpcCategory::Enemy,
            } => Some(PlayerAction::Combat { target: id }),
            Self::Resource {
                id,
                kind: ResourceKind::Tree,
            } => Some(PlayerAction::Skilling {
                target: id,
                skill: Skill::Woodcutting,
            }),
            Self::Resource {
                id,
                kind: ResourceKind::Rock,
            } => Some(PlayerAction::Skilling {
                target: id,
                skill: Skill::Mining,
            }),
            Self::Resource {
                id,
                kind: ResourceKind::Bank,
            } => Some(PlayerAction::Banking { target: id }),
            Self::Npc {
                category: NpcCategory::Shop,
                ..
            }
            | Self::Ground => None,
        }
    }

    /// Shopkeeper whose shop opens on arrival.
    const fn shop(self) -> Option<EntityId> {
        match self {
            Self::Npc {
                id,
                category: NpcCategory::Shop,
            } => Some(id),
            _ => None,
        }
    }
}

/// Resolves a click on `tile` into the next state.
///
/// - With a reachable destination, the path is installed, the classified
///   action (or the shop to open) becomes pending, any active action is
///   cleared and a marker effect is placed on the destination.
/// - With the player already on the destination, the action is armed
///   immediately, the bank or shop opens, or a ground item is picked up.
/// - Otherwise a "can't get there" message is logged and nothing else
///   changes.
#[must_use]
pub fn click_tile(state: &WorldState, tile: Tile, ctx: &DispatchContext<'_>) -> WorldState {
    let mut next = state.clone();
    let target = ClickTarget::at(&next, tile);

    let destination = if target == ClickTarget::Ground {
        tile
    } else {
        let Some(adjacent) = nearest_free_neighbour(&next, tile, ctx) else {
            next.log_system("Unreachable");
            return next;
        };
        adjacent
    };

    let shop = target.shop();
    if shop.is_some() {
        next.log_game("Walking to shop...");
    }
    let pending = target.pending_action();

    let path = find_path(
        next.player.position,
        destination,
        ctx.terrain,
        &next.resources,
        &next.npcs,
        ctx.config.path_iteration_limit,
    );

    if !path.is_empty() {
        tracing::trace!(?destination, steps = path.len(), ?pending, "walk");
        next.player.path_queue = path.into();
        next.player.pending_action = pending;
        next.player.pending_shop = shop;
        next.player.action = None;
        next.open_interface = None;
        next.push_effect(destination, EffectKind::Marker, ctx.now_ms);
    } else if distance(next.player.position, destination) == 0 {
        next.player.stop();
        if let Some(action) = pending {
            next.player.action = Some(action);
            if matches!(action, PlayerAction::Banking { .. }) {
                next.open_interface = Some(Interface::Bank);
            }
        }
        if shop.is_some() {
            next.open_interface = Some(Interface::Shop);
        }
        if target == ClickTarget::Ground {
            pick_up(&mut next, tile, ctx.config.inventory_capacity);
        }
    } else {
        next.log_system("Can't get there");
    }
    next
}

/// Nearest unblocked cardinal neighbour of `tile` by distance to the player.
///
/// Ties keep neighbour order (up, down, left, right).
fn nearest_free_neighbour(state: &WorldState, tile: Tile, ctx: &DispatchContext<'_>) -> Option<Tile> {
    let mut candidates: Vec<Tile> = CARDINAL_OFFSETS
        .iter()
        .map(|&offset| tile + offset)
        .filter(|&n| !is_blocked(n, ctx.terrain, &state.resources, &state.npcs))
        .collect();
    candidates.sort_by_key(|&n| distance(state.player.position, n));
    candidates.first().copied()
}

fn pick_up(state: &mut WorldState, tile: Tile, capacity: usize) {
    let Some(index) = state.ground_items.iter().position(|g| g.tile == tile) else {
        return;
    };
    let kind = state.ground_items[index].stack.kind;
    if !inventory::has_room_for(&state.player.inventory, kind, Some(capacity)) {
        state.log_system("Inventory full");
        return;
    }
    let item = state.ground_items.remove(index);
    if inventory::insert_stack(&mut state.player.inventory, item.stack, Some(capacity)).is_ok() {
        state.log_game(format!("Took {}", kind.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entity::{IdAllocator, Npc, Resource};
    use crate::item::ItemKind;
    use crate::player::Player;
    use crate::terrain::{Terrain, TileKind};
    use rand::rngs::mock::StepRng;

    fn state_at(position: Tile) -> WorldState {
        let mut ids = IdAllocator::default();
        let player = Player::starting(position, &mut ids);
        WorldState::empty(player, ids)
    }

    fn click(state: &WorldState, tile: Tile, terrain: &Terrain) -> WorldState {
        let config = SimConfig::default();
        let mut rng = StepRng::new(0, 0);
        let ctx = DispatchContext::new(terrain, &config, &mut rng, 1_000);
        click_tile(state, tile, &ctx)
    }

    mod walk_tests {
        use super::*;

        #[test]
        fn plain_walk_installs_path_and_marker() {
            let terrain = Terrain::open(10, 10);
            let s = state_at(Tile::new(1, 1));
            let next = click(&s, Tile::new(4, 1), &terrain);
            assert_eq!(next.player.path_queue.len(), 3);
            assert!(next.player.pending_action.is_none());
            assert_eq!(next.effects.len(), 1);
            assert_eq!(next.effects[0].kind, EffectKind::Marker);
            assert_eq!(next.effects[0].tile, Tile::new(4, 1));
            assert!(s.player.path_queue.is_empty());
        }

        #[test]
        fn blocked_tile_cannot_be_reached() {
            let terrain = Terrain::open(10, 10).with_tile(Tile::new(5, 5), TileKind::Wall);
            let s = state_at(Tile::new(1, 1));
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert!(next.player.path_queue.is_empty());
            assert_eq!(next.messages.last().map(|m| m.text.as_str()), Some("Can't get there"));
        }

        #[test]
        fn new_click_cancels_active_action() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 1));
            s.player.action = Some(PlayerAction::Combat {
                target: EntityId::new(9),
            });
            let next = click(&s, Tile::new(3, 3), &terrain);
            assert!(next.player.action.is_none());
        }
    }

    mod target_tests {
        use super::*;

        #[test]
        fn tree_click_paths_to_nearest_neighbour() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 5));
            s.resources
                .push(Resource::new(EntityId::new(1), ResourceKind::Tree, Tile::new(5, 5)));
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert_eq!(next.player.path_queue.back(), Some(&Tile::new(4, 5)));
            assert_eq!(
                next.player.pending_action,
                Some(PlayerAction::Skilling {
                    target: EntityId::new(1),
                    skill: Skill::Woodcutting
                })
            );
        }

        #[test]
        fn enemy_click_arms_combat() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 1));
            s.npcs
                .push(Npc::enemy(EntityId::new(2), "Goblin", Tile::new(6, 6), 5, 1));
            let next = click(&s, Tile::new(6, 6), &terrain);
            assert_eq!(
                next.player.pending_action,
                Some(PlayerAction::Combat {
                    target: EntityId::new(2)
                })
            );
        }

        #[test]
        fn adjacent_click_arms_immediately() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(4, 5));
            s.resources
                .push(Resource::new(EntityId::new(1), ResourceKind::Rock, Tile::new(5, 5)));
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert!(next.player.path_queue.is_empty());
            assert_eq!(
                next.player.action,
                Some(PlayerAction::Skilling {
                    target: EntityId::new(1),
                    skill: Skill::Mining
                })
            );
        }

        #[test]
        fn adjacent_bank_opens_interface() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(5, 4));
            s.resources
                .push(Resource::new(EntityId::new(1), ResourceKind::Bank, Tile::new(5, 5)));
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert_eq!(next.open_interface, Some(Interface::Bank));
        }

        #[test]
        fn shop_click_walks_without_action() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 1));
            s.npcs
                .push(Npc::shopkeeper(EntityId::new(3), "Merchant", Tile::new(6, 6)));
            let next = click(&s, Tile::new(6, 6), &terrain);
            assert!(!next.player.path_queue.is_empty());
            assert!(next.player.pending_action.is_none());
            assert_eq!(next.player.pending_shop, Some(EntityId::new(3)));
            assert_eq!(next.messages[0].text, "Walking to shop...");
            assert_eq!(next.open_interface, None);
        }

        #[test]
        fn adjacent_shop_opens_interface() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(6, 5));
            s.npcs
                .push(Npc::shopkeeper(EntityId::new(3), "Merchant", Tile::new(6, 6)));
            let next = click(&s, Tile::new(6, 6), &terrain);
            assert_eq!(next.open_interface, Some(Interface::Shop));
        }

        #[test]
        fn enclosed_target_is_unreachable() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 1));
            s.resources
                .push(Resource::new(EntityId::new(1), ResourceKind::Tree, Tile::new(5, 5)));
            for (i, offset) in CARDINAL_OFFSETS.iter().enumerate() {
                s.resources.push(Resource::new(
                    EntityId::new(10 + i as u64),
                    ResourceKind::Rock,
                    Tile::new(5, 5) + *offset,
                ));
            }
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert_eq!(next.messages.last().map(|m| m.text.as_str()), Some("Unreachable"));
            assert_eq!(next.player, s.player);
        }

        #[test]
        fn depleted_resource_is_plain_ground() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(1, 1));
            let mut tree = Resource::new(EntityId::new(1), ResourceKind::Tree, Tile::new(5, 5));
            tree.deplete(10);
            s.resources.push(tree);
            let next = click(&s, Tile::new(5, 5), &terrain);
            assert_eq!(next.player.path_queue.back(), Some(&Tile::new(5, 5)));
            assert!(next.player.pending_action.is_none());
        }
    }

    mod pickup_tests {
        use super::*;

        #[test]
        fn standing_on_item_picks_it_up() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(3, 3));
            let coins = s.new_stack(ItemKind::Coins, 12);
            s.spawn_ground_item(Tile::new(3, 3), coins);
            let next = click(&s, Tile::new(3, 3), &terrain);
            assert!(next.ground_items.is_empty());
            assert_eq!(next.player.inventory.len(), 2);
            assert_eq!(next.messages.last().map(|m| m.text.as_str()), Some("Took Coins"));
        }

        #[test]
        fn full_inventory_leaves_item_on_ground() {
            let terrain = Terrain::open(10, 10);
            let mut s = state_at(Tile::new(3, 3));
            while s.player.inventory.len() < 20 {
                let logs = s.new_stack(ItemKind::Logs, 1);
                s.player.inventory.push(logs);
            }
            let bones = s.new_stack(ItemKind::Bones, 1);
            s.spawn_ground_item(Tile::new(3, 3), bones);
            let next = click(&s, Tile::new(3, 3), &terrain);
            assert_eq!(next.ground_items.len(), 1);
            assert_eq!(next.player.inventory.len(), 20);
            assert_eq!(next.messages.last().map(|m| m.text.as_str()), Some("Inventory full"));
        }
    }
}
