use super::realms::{experience_required, realm};
use crate::character::player::Player;
use crate::character::stats::apply_bonuses;
use crate::combat::abilities::ability_unlocked_at;
use crate::core::errors::Rejection;
use serde::Serialize;

/// A realm the player has just entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakthrough {
    pub rank: u8,
    pub realm_name: &'static str,
    pub unlocked_ability: Option<&'static str>,
}

impl Breakthrough {
    pub fn message(&self) -> String {
        format!("恭喜！你成功突破到了{}境界", self.realm_name)
    }
}

/// Applies the realm's bonuses and grants any ability tied to it. Called
/// exactly once per realm.
pub fn enter_realm(player: &mut Player, rank: u8) -> Option<&'static str> {
    if let Some(realm) = realm(rank) {
        apply_bonuses(&mut player.stats, realm.bonuses);
    }
    let ability = ability_unlocked_at(rank)?;
    if player.abilities.iter().any(|a| a.name == ability.name) {
        return None;
    }
    player.abilities.push(ability);
    Some(ability.name)
}

pub fn can_advance(player: &Player) -> bool {
    player.rank > 0 && player.experience >= experience_required(player.rank)
}

/// Breaks through to the next realm. Excess experience carries over.
pub fn advance(player: &mut Player) -> Result<Breakthrough, Rejection> {
    if player.rank == 0 {
        return Err(Rejection::RankCeiling);
    }
    let required = experience_required(player.rank);
    if player.experience < required {
        return Err(Rejection::NotEnoughExperience {
            current: player.experience,
            required,
        });
    }

    player.experience -= required;
    player.rank -= 1;
    let rank = player.rank;
    let unlocked_ability = enter_realm(player, rank);

    let breakthrough = Breakthrough {
        rank: player.rank,
        realm_name: player.realm_name(),
        unlocked_ability,
    };
    log::info!(
        "{} broke through to rank {} ({})",
        player.name,
        breakthrough.rank,
        breakthrough.realm_name
    );
    Ok(breakthrough)
}

/// Adds experience and breaks through as many times as it allows.
pub fn gain_experience(player: &mut Player, amount: u64) -> Vec<Breakthrough> {
    player.experience = player.experience.saturating_add(amount);
    let mut entered = Vec::new();
    while can_advance(player) {
        match advance(player) {
            Ok(b) => entered.push(b),
            Err(_) => break,
        }
    }
    entered
}
