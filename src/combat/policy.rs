//! Action selection for auto-combat.

use crate::character::stats::StatBlock;
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoAction {
    Attack,
    Special,
    Defend,
}

/// Picks the player's next move, first matching rule wins:
/// low qi attacks, a wounded monster gets a special, a wounded player
/// sometimes defends, otherwise a 60/40 split between attack and special.
pub fn choose_auto_action(player: &StatBlock, monster: &StatBlock, rng: &mut impl Rng) -> AutoAction {
    if player.qi < AUTO_LOW_QI_THRESHOLD {
        return AutoAction::Attack;
    }
    if (monster.health as f64) < monster.max_health as f64 * AUTO_MONSTER_HEALTH_RATIO {
        return AutoAction::Special;
    }
    if (player.health as f64) < player.max_health as f64 * AUTO_PLAYER_HEALTH_RATIO
        && rng.gen::<f64>() < AUTO_DEFEND_CHANCE
    {
        return AutoAction::Defend;
    }
    if rng.gen::<f64>() < AUTO_BASIC_ATTACK_CHANCE {
        AutoAction::Attack
    } else {
        AutoAction::Special
    }
}
