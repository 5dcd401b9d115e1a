//! Combat resolver.
//!
//! While the player's active action is [`PlayerAction::Combat`], each tick
//! resolves one exchange:
//! 1. The player's attack roll against the npc's defence roll
//! 2. Damage, experience and, on a kill, loot and respawn scheduling
//! 3. The npc's flat retaliation if it survived, and player death on zero hp
//!
//! # Rolls
//!
//! `attack = (attack_level + aim) * U` and `defence = (defence_level + armor) * U'`
//! with `U, U'` uniform in `[0.5, 1.5)`. A hit deals a uniform integer in
//! `0..=max_hit`.

use rand::{Rng, RngCore};

use crate::dispatch::DispatchContext;
use crate::geometry::within_range;
use crate::item::EquipSlot;
use crate::loot::roll_loot;
use crate::player::{Player, PlayerAction, Skill};
use crate::state::{EffectKind, WorldState};

use super::Resolver;

/// Experience granted in attack and in strength for every landed hit.
pub const HIT_XP: f64 = 4.0;

/// Hitpoints experience per point of damage dealt.
pub const HITPOINTS_XP_PER_DAMAGE: f64 = 1.3;

/// Damage of an enemy's retaliation hit.
pub const RETALIATION_DAMAGE: u32 = 1;

/// Offensive numbers of an attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackProfile {
    /// Attack level.
    pub attack_level: u32,
    /// Strength level.
    pub strength_level: u32,
    /// Weapon accuracy bonus.
    pub aim: i32,
    /// Weapon damage bonus.
    pub power: i32,
}

impl AttackProfile {
    /// Derives the player's profile from levels and the main-hand weapon.
    #[must_use]
    pub fn of(player: &Player) -> Self {
        let weapon = player.equipment.stats(EquipSlot::MainHand);
        Self {
            attack_level: player.level(Skill::Attack),
            strength_level: player.level(Skill::Strength),
            aim: weapon.aim,
            power: weapon.power,
        }
    }
}

/// Defensive numbers of a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenceProfile {
    /// Defence level or stat.
    pub defense_level: u32,
    /// Off-hand armour bonus.
    pub armor: i32,
}

/// Compares both rolls for the given multipliers. Ties miss.
#[must_use]
pub fn roll_hit(attacker: &AttackProfile, defender: &DefenceProfile, attack_mult: f64, defence_mult: f64) -> bool {
    let attack = (f64::from(attacker.attack_level) + f64::from(attacker.aim)) * attack_mult;
    let defence = (f64::from(defender.defense_level) + f64::from(defender.armor)) * defence_mult;
    attack > defence
}

/// `floor(1.3 + strength_level / 10 + power / 8)`, never negative.
#[must_use]
pub fn max_hit(attacker: &AttackProfile) -> u32 {
    let raw = 1.3 + f64::from(attacker.strength_level) / 10.0 + f64::from(attacker.power) / 8.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hit = raw.floor().max(0.0) as u32;
    hit
}

/// Rolls one attack. Returns the damage on a hit (possibly zero), `None` on
/// a miss.
pub fn calculate_hit(attacker: &AttackProfile, defender: &DefenceProfile, rng: &mut dyn RngCore) -> Option<u32> {
    let attack_mult = rng.gen::<f64>() + 0.5;
    let defence_mult = rng.gen::<f64>() + 0.5;
    roll_hit(attacker, defender, attack_mult, defence_mult).then(|| rng.gen_range(0..=max_hit(attacker)))
}

/// Resolver for player-versus-npc combat.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl Resolver for CombatResolver {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn resolve(&self, state: &mut WorldState, ctx: &mut DispatchContext<'_>) {
        let Some(PlayerAction::Combat { target }) = state.player.action else {
            return;
        };
        let Some(index) = state
            .npc_index(target)
            .filter(|&i| state.npcs[i].is_alive())
            .filter(|&i| within_range(state.player.position, state.npcs[i].position, ctx.config.interaction_range))
        else {
            state.player.action = None;
            return;
        };

        let npc_tile = state.npcs[index].position;
        let attacker = AttackProfile::of(&state.player);
        let defender = DefenceProfile {
            defense_level: state.npcs[index].defense,
            armor: 0,
        };

        match calculate_hit(&attacker, &defender, ctx.rng) {
            Some(damage) => {
                state.push_effect(npc_tile, EffectKind::Damage(damage), ctx.now_ms);
                let skills = &mut state.player.skills;
                skills.add_xp(Skill::Attack, HIT_XP);
                skills.add_xp(Skill::Strength, HIT_XP);
                skills.add_xp(Skill::Hitpoints, HITPOINTS_XP_PER_DAMAGE * f64::from(damage));

                if state.npcs[index].take_hit(damage, ctx.config.npc_respawn_ticks) {
                    let category = state.npcs[index].category;
                    for stack in roll_loot(category, ctx.rng, &mut state.item_ids) {
                        state.spawn_ground_item(npc_tile, stack);
                    }
                    tracing::debug!(npc = %target, "npc killed");
                    state.log_system("Victory!");
                    state.player.action = None;
                }
            }
            None => state.push_effect(npc_tile, EffectKind::Miss, ctx.now_ms),
        }

        if !state.npcs[index].is_alive() {
            return;
        }

        let player_tile = state.player.position;
        if ctx.rng.gen::<f64>() < ctx.config.retaliation_chance {
            state.push_effect(player_tile, EffectKind::Damage(RETALIATION_DAMAGE), ctx.now_ms);
            state.player.hp = state.player.hp.saturating_sub(RETALIATION_DAMAGE);
            if state.player.hp == 0 {
                tracing::debug!(tick = state.tick, "player died");
                state.log_system("You have died!");
                state.player.die(ctx.config.spawn_tile, &mut state.item_ids);
            }
        } else {
            state.push_effect(player_tile, EffectKind::Miss, ctx.now_ms);
        }
    }
}
