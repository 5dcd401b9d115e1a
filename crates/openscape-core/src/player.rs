//! The player actor: skills, action state, containers and equipment.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, IdAllocator};
use crate::geometry::{self, Tile};
use crate::item::{EquipSlot, InstanceId, ItemKind, ItemStack, ItemStats};

/// Trainable skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Accuracy in melee.
    Attack,
    /// Melee max hit.
    Strength,
    /// Blocking.
    Defense,
    /// Trained by dealing damage.
    Hitpoints,
    /// Chopping trees.
    Woodcutting,
    /// Mining rocks.
    Mining,
    /// Burying bones.
    Prayer,
}

impl Skill {
    /// Every skill, in display order.
    pub const ALL: [Self; 7] = [
        Self::Attack,
        Self::Strength,
        Self::Defense,
        Self::Hitpoints,
        Self::Woodcutting,
        Self::Mining,
        Self::Prayer,
    ];

    /// Item yielded by a successful gather, for gathering skills.
    #[must_use]
    pub const fn gathered_item(self) -> Option<ItemKind> {
        match self {
            Self::Woodcutting => Some(ItemKind::Logs),
            Self::Mining => Some(ItemKind::CopperOre),
            _ => None,
        }
    }
}

/// Experience per skill. Levels are always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills(BTreeMap<Skill, f64>);

impl Default for Skills {
    fn default() -> Self {
        Self(Skill::ALL.into_iter().map(|s| (s, 0.0)).collect())
    }
}

impl Skills {
    /// Experience in `skill`.
    #[must_use]
    pub fn xp(&self, skill: Skill) -> f64 {
        self.0.get(&skill).copied().unwrap_or(0.0)
    }

    /// Level in `skill`, derived from its experience.
    #[must_use]
    pub fn level(&self, skill: Skill) -> u32 {
        geometry::level_from_xp(self.xp(skill))
    }

    /// Grants `amount` experience in `skill`.
    pub fn add_xp(&mut self, skill: Skill, amount: f64) {
        *self.0.entry(skill).or_insert(0.0) += amount;
    }

    /// Returns a copy with `skill` set to exactly `xp`.
    #[must_use]
    pub fn with_xp(mut self, skill: Skill, xp: f64) -> Self {
        self.0.insert(skill, xp);
        self
    }
}

/// A queued or active player action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Fighting an npc.
    Combat {
        /// Npc being attacked.
        target: EntityId,
    },
    /// Gathering from a resource.
    Skilling {
        /// Resource being gathered.
        target: EntityId,
        /// Skill being trained.
        skill: Skill,
    },
    /// Using a bank booth.
    Banking {
        /// Bank resource.
        target: EntityId,
    },
}

impl PlayerAction {
    /// Entity the action is aimed at.
    #[must_use]
    pub const fn target(&self) -> EntityId {
        match *self {
            Self::Combat { target } | Self::Skilling { target, .. } | Self::Banking { target } => {
                target
            }
        }
    }
}

/// Worn items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Weapon slot.
    pub main_hand: Option<ItemStack>,
    /// Shield slot.
    pub off_hand: Option<ItemStack>,
}

impl Equipment {
    /// Item worn in `slot`.
    #[must_use]
    pub const fn get(&self, slot: EquipSlot) -> Option<&ItemStack> {
        match slot {
            EquipSlot::MainHand => self.main_hand.as_ref(),
            EquipSlot::OffHand => self.off_hand.as_ref(),
        }
    }

    /// Mutable access to `slot`.
    pub fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemStack> {
        match slot {
            EquipSlot::MainHand => &mut self.main_hand,
            EquipSlot::OffHand => &mut self.off_hand,
        }
    }

    /// Stats of the item in `slot`, zero when empty.
    #[must_use]
    pub fn stats(&self, slot: EquipSlot) -> ItemStats {
        self.get(slot).map(|s| s.template().stats).unwrap_or_default()
    }
}

/// The single player actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current tile.
    pub position: Tile,
    /// Current hitpoints, in `0..=max_hp`.
    pub hp: u32,
    /// Maximum hitpoints.
    pub max_hp: u32,
    /// Remaining steps, consumed front to back one per tick.
    pub path_queue: VecDeque<Tile>,
    /// Action armed once the path ends next to its target.
    pub pending_action: Option<PlayerAction>,
    /// Shopkeeper whose shop opens once the path ends beside it.
    #[serde(default)]
    pub pending_shop: Option<EntityId>,
    /// Action resolved every tick.
    pub action: Option<PlayerAction>,
    /// Experience per skill.
    pub skills: Skills,
    /// Capacity-limited carried items.
    pub inventory: Vec<ItemStack>,
    /// Uncapped banked items.
    pub bank: Vec<ItemStack>,
    /// Worn items.
    pub equipment: Equipment,
}

impl Player {
    /// Hitpoints of a fresh character.
    pub const STARTING_HP: u32 = 10;

    /// Hitpoints experience of a fresh character (level 10).
    pub const STARTING_HITPOINTS_XP: f64 = 1154.0;

    /// Creates a fresh character on `spawn` carrying a bronze sword.
    #[must_use]
    pub fn starting(spawn: Tile, item_ids: &mut IdAllocator) -> Self {
        let sword = ItemStack::new(
            InstanceId::new(item_ids.allocate()),
            ItemKind::BronzeSword,
            1,
        );
        Self {
            position: spawn,
            hp: Self::STARTING_HP,
            max_hp: Self::STARTING_HP,
            path_queue: VecDeque::new(),
            pending_action: None,
            pending_shop: None,
            action: None,
            skills: Skills::default().with_xp(Skill::Hitpoints, Self::STARTING_HITPOINTS_XP),
            inventory: vec![sword],
            bank: Vec::new(),
            equipment: Equipment::default(),
        }
    }

    /// Resets the player after death.
    ///
    /// Carried and worn items are lost; the inventory becomes a single empty
    /// coin stack. The bank and skills are kept.
    pub fn die(&mut self, spawn: Tile, item_ids: &mut IdAllocator) {
        self.position = spawn;
        self.hp = self.max_hp;
        self.action = None;
        self.pending_action = None;
        self.pending_shop = None;
        self.path_queue.clear();
        self.inventory = vec![ItemStack::new(
            InstanceId::new(item_ids.allocate()),
            ItemKind::Coins,
            0,
        )];
        self.equipment = Equipment::default();
    }

    /// Level in `skill`.
    #[must_use]
    pub fn level(&self, skill: Skill) -> u32 {
        self.skills.level(skill)
    }

    /// Cancels any walk, pending action and active action.
    pub fn stop(&mut self) {
        self.path_queue.clear();
        self.pending_action = None;
        self.pending_shop = None;
        self.action = None;
    }
}
