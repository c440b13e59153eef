use crate::character::player::Player;
use crate::character::stats::{apply_bonuses, describe_bonuses, StatBonus};
use crate::core::constants::{ACQUIRED_UNLOCK_RANK, HIGH_TIER_UNLOCK_RANK, LOW_TIER_UNLOCK_RANK};
use crate::core::errors::Rejection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QiAttribute {
    Neutral,
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl QiAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            QiAttribute::Neutral => "混元",
            QiAttribute::Metal => "金",
            QiAttribute::Wood => "木",
            QiAttribute::Water => "水",
            QiAttribute::Fire => "火",
            QiAttribute::Earth => "土",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreAbility {
    pub name: &'static str,
    pub description: &'static str,
    pub bonuses: &'static [StatBonus],
}

#[derive(Debug, Clone, Serialize)]
pub struct InbornHeartMethod {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub attribute: QiAttribute,
    pub bonuses: &'static [StatBonus],
    pub low_tier: &'static [CoreAbility],
    pub high_tier: &'static [CoreAbility],
}

impl InbornHeartMethod {
    pub fn options(&self, tier: AbilityTier) -> &'static [CoreAbility] {
        match tier {
            AbilityTier::Low => self.low_tier,
            AbilityTier::High => self.high_tier,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AcquiredHeartMethod {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub attribute: QiAttribute,
    /// The learner's rank must be at or below this.
    pub required_rank: u8,
    pub bonuses: &'static [StatBonus],
    pub core_abilities: &'static [CoreAbility],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityTier {
    Low,
    High,
}

impl AbilityTier {
    pub fn unlock_rank(&self) -> u8 {
        match self {
            AbilityTier::Low => LOW_TIER_UNLOCK_RANK,
            AbilityTier::High => HIGH_TIER_UNLOCK_RANK,
        }
    }
}

/// A player's inborn method and the two one-time ability choices on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InbornProgress {
    pub method: &'static str,
    pub low_choice: Option<usize>,
    pub high_choice: Option<usize>,
}

impl InbornProgress {
    fn choice(&self, tier: AbilityTier) -> Option<usize> {
        match tier {
            AbilityTier::Low => self.low_choice,
            AbilityTier::High => self.high_choice,
        }
    }

    fn set_choice(&mut self, tier: AbilityTier, index: usize) {
        match tier {
            AbilityTier::Low => self.low_choice = Some(index),
            AbilityTier::High => self.high_choice = Some(index),
        }
    }
}

pub fn learn_inborn(player: &mut Player, method: &'static InbornHeartMethod) -> Result<String, Rejection> {
    if player.inborn.is_some() {
        return Err(Rejection::AlreadyHasInborn);
    }
    apply_bonuses(&mut player.stats, method.bonuses);
    player.inborn = Some(InbornProgress {
        method: method.name,
        low_choice: None,
        high_choice: None,
    });
    log::debug!("{} learned inborn method {}", player.name, method.key);
    Ok(format!(
        "你领悟了先天心法「{}」：{}",
        method.name,
        describe_bonuses(method.bonuses)
    ))
}

/// Whether the slot for `tier` can be filled right now.
pub fn can_select(player: &Player, tier: AbilityTier) -> Result<(), Rejection> {
    let progress = player.inborn.as_ref().ok_or(Rejection::NoInbornMethod)?;
    if player.rank > tier.unlock_rank() {
        return Err(Rejection::RankTooLow {
            required: tier.unlock_rank(),
        });
    }
    if progress.choice(tier).is_some() {
        return Err(Rejection::SlotFilled);
    }
    Ok(())
}

/// Fills one core-ability slot of the inborn method. Irreversible.
pub fn select_core_ability(
    player: &mut Player,
    method: &'static InbornHeartMethod,
    tier: AbilityTier,
    index: usize,
) -> Result<String, Rejection> {
    can_select(player, tier)?;
    let ability = method
        .options(tier)
        .get(index)
        .ok_or(Rejection::UnknownIndex { index })?;

    apply_bonuses(&mut player.stats, ability.bonuses);
    player.core_abilities.push(ability.name);
    if let Some(progress) = player.inborn.as_mut() {
        progress.set_choice(tier, index);
    }
    Ok(format!(
        "你领悟了核心能力「{}」：{}",
        ability.name,
        describe_bonuses(ability.bonuses)
    ))
}

pub fn can_learn_acquired(player: &Player, method: &AcquiredHeartMethod) -> bool {
    player.rank <= ACQUIRED_UNLOCK_RANK && player.rank <= method.required_rank
}

/// Learns an acquired method and every core ability it carries.
pub fn learn_acquired(
    player: &mut Player,
    method: &'static AcquiredHeartMethod,
) -> Result<String, Rejection> {
    if player.acquired_methods.contains(&method.name) {
        return Err(Rejection::AlreadyLearned {
            name: method.name.to_string(),
        });
    }
    if !can_learn_acquired(player, method) {
        return Err(Rejection::RankTooLow {
            required: method.required_rank.min(ACQUIRED_UNLOCK_RANK),
        });
    }

    apply_bonuses(&mut player.stats, method.bonuses);
    player.acquired_methods.push(method.name);
    for ability in method.core_abilities {
        apply_bonuses(&mut player.stats, ability.bonuses);
        player.core_abilities.push(ability.name);
    }
    log::debug!("{} learned acquired method {}", player.name, method.key);

    let granted: Vec<&str> = method.core_abilities.iter().map(|a| a.name).collect();
    Ok(format!(
        "你学会了后天心法「{}」，获得核心能力：{}",
        method.name,
        granted.join("、")
    ))
}

/// Acquired methods the player could learn right now.
pub fn available_acquired<'a>(
    player: &Player,
    methods: &'a [AcquiredHeartMethod],
) -> Vec<&'a AcquiredHeartMethod> {
    methods
        .iter()
        .filter(|m| can_learn_acquired(player, m) && !player.acquired_methods.contains(&m.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::martial::data::{ACQUIRED_METHODS, INBORN_METHODS};

    fn taiji() -> &'static InbornHeartMethod {
        &INBORN_METHODS[0]
    }

    #[test]
    fn test_learn_inborn_once() {
        let mut player = Player::new("少侠");
        let before = player.stats.clone();
        learn_inborn(&mut player, taiji()).unwrap();
        assert_eq!(player.stats.max_qi, before.max_qi + 20);
        assert_eq!(player.stats.defense, before.defense + 5);
        assert!((player.stats.traits.qi_recovery - 2.0).abs() < 1e-9);

        assert_eq!(
            learn_inborn(&mut player, &INBORN_METHODS[1]),
            Err(Rejection::AlreadyHasInborn)
        );
        assert_eq!(player.inborn_method_name(), Some("太极心法"));
    }

    #[test]
    fn test_low_tier_gated_by_rank() {
        let mut player = Player::new("少侠");
        learn_inborn(&mut player, taiji()).unwrap();
        assert_eq!(
            select_core_ability(&mut player, taiji(), AbilityTier::Low, 0),
            Err(Rejection::RankTooLow { required: 8 })
        );
        player.rank = 8;
        let before = player.stats.defense;
        select_core_ability(&mut player, taiji(), AbilityTier::Low, 0).unwrap();
        assert_eq!(player.stats.defense, before + 10);
        assert!(player.core_abilities.contains(&"化劲"));
    }

    #[test]
    fn test_slot_selection_irreversible() {
        let mut player = Player::new("少侠");
        learn_inborn(&mut player, taiji()).unwrap();
        player.rank = 6;
        select_core_ability(&mut player, taiji(), AbilityTier::High, 1).unwrap();
        let snapshot = player.stats.clone();
        assert_eq!(
            select_core_ability(&mut player, taiji(), AbilityTier::High, 0),
            Err(Rejection::SlotFilled)
        );
        assert_eq!(player.stats, snapshot);
        // the low slot is still open
        assert!(can_select(&player, AbilityTier::Low).is_ok());
    }

    #[test]
    fn test_select_without_inborn_or_bad_index() {
        let mut player = Player::new("少侠");
        player.rank = 6;
        assert_eq!(
            select_core_ability(&mut player, taiji(), AbilityTier::Low, 0),
            Err(Rejection::NoInbornMethod)
        );
        learn_inborn(&mut player, taiji()).unwrap();
        assert_eq!(
            select_core_ability(&mut player, taiji(), AbilityTier::Low, 7),
            Err(Rejection::UnknownIndex { index: 7 })
        );
        assert_eq!(player.inborn.as_ref().and_then(|p| p.low_choice), None);
    }

    #[test]
    fn test_acquired_gates() {
        let jiuyang = &ACQUIRED_METHODS[0];
        let beiming = &ACQUIRED_METHODS[1];
        let mut player = Player::new("少侠");
        player.rank = 6;
        assert!(!can_learn_acquired(&player, jiuyang));
        player.rank = 5;
        assert!(can_learn_acquired(&player, jiuyang));
        assert!(!can_learn_acquired(&player, beiming));
        player.rank = 4;
        assert!(can_learn_acquired(&player, beiming));
    }

    #[test]
    fn test_learn_acquired_grants_core_abilities() {
        let jiuyang = &ACQUIRED_METHODS[0];
        let mut player = Player::new("少侠");
        player.rank = 5;
        let before = player.stats.max_health;
        let msg = learn_acquired(&mut player, jiuyang).unwrap();
        assert!(msg.contains("九阳护体"));
        assert_eq!(player.stats.max_health, before + 100);
        assert!((player.stats.traits.health_regen - 5.0).abs() < 1e-9);
        assert_eq!(player.core_abilities, vec!["九阳护体", "阳炎爆"]);
        assert!(player.knows_heart_method("九阳神功"));

        assert!(matches!(
            learn_acquired(&mut player, jiuyang),
            Err(Rejection::AlreadyLearned { .. })
        ));
        assert!(available_acquired(&player, &ACQUIRED_METHODS).is_empty());
    }
}
