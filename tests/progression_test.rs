//! Integration test: experience -> breakthrough -> unlocks
//!
//! Covers the realm ladder end to end: cascading breakthroughs, one-time
//! realm bonuses, ability unlocks, heart-method tiers and technique gates.

use jianghu::character::player::Player;
use jianghu::core::constants::{HIGHEST_RANK, LOWEST_RANK};
use jianghu::core::content::ContentCatalog;
use jianghu::core::errors::Rejection;
use jianghu::core::session::GameSession;
use jianghu::core::world::MonsterRoster;
use jianghu::cultivation::logic::{advance, gain_experience};
use jianghu::cultivation::realms::{experience_required, realm_name, total_experience_to_summit};
use jianghu::martial::heart_method::AbilityTier;

fn session(catalog: &ContentCatalog) -> GameSession<'_, MonsterRoster> {
    GameSession::new(catalog, MonsterRoster::new(), "少侠", 1).with_message_capacity(64)
}

// =========================================================================
// Ladder arithmetic
// =========================================================================

#[test]
fn test_thresholds_double_each_realm() {
    assert_eq!(experience_required(9), 100);
    assert_eq!(experience_required(8), 200);
    assert_eq!(experience_required(1), 25_600);
    assert_eq!(total_experience_to_summit(), 100 * (512 - 1));
}

#[test]
fn test_large_gain_cascades_breakthroughs() {
    let mut player = Player::new("少侠");
    // 100 + 200 + 400 = 700 reaches rank 6, 50 left over
    let entered = gain_experience(&mut player, 750);
    let ranks: Vec<u8> = entered.iter().map(|b| b.rank).collect();
    assert_eq!(ranks, vec![8, 7, 6]);
    assert_eq!(player.rank, 6);
    assert_eq!(player.experience, 50);
    assert_eq!(player.realm_name(), realm_name(6));
}

#[test]
fn test_realm_bonuses_raise_maxima_only() {
    let mut player = Player::new("少侠");
    player.stats.health = 150;
    player.experience = 100;
    advance(&mut player).unwrap();

    assert_eq!(player.stats.max_health, 350);
    assert_eq!(player.stats.health, 150);
    assert_eq!(player.stats.max_qi, 100);
    assert_eq!(player.stats.qi, 50);
    assert_eq!(player.stats.attack, 40);
    assert_eq!(player.stats.defense, 21);
}

#[test]
fn test_summit_is_a_ceiling() {
    let mut player = Player::new("少侠");
    gain_experience(&mut player, total_experience_to_summit());
    assert_eq!(player.rank, HIGHEST_RANK);
    assert_eq!(player.experience, 0);
    assert_eq!(player.experience_to_next(), None);

    player.experience = u64::MAX;
    assert_eq!(advance(&mut player), Err(Rejection::RankCeiling));
    assert!(gain_experience(&mut player, 1).is_empty());
}

#[test]
fn test_abilities_unlock_with_realms() {
    let mut player = Player::new("少侠");
    let entered = gain_experience(&mut player, 100 + 200);
    assert_eq!(entered[0].unlocked_ability, Some("旋风斩"));
    assert_eq!(entered[1].unlocked_ability, Some("飞剑术"));
    let names: Vec<&str> = player.abilities.iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["基本打击", "气力拳", "旋风斩", "飞剑术"]);
}

// =========================================================================
// Heart methods and techniques through the session
// =========================================================================

#[test]
fn test_core_ability_tiers_follow_rank() {
    let catalog = ContentCatalog::new();
    let mut s = session(&catalog);
    s.learn_inborn_heart_method("太极心法").unwrap();
    assert_eq!(
        s.learn_inborn_heart_method("shaolin"),
        Err(Rejection::AlreadyHasInborn)
    );

    assert_eq!(
        s.select_core_ability(AbilityTier::Low, 0),
        Err(Rejection::RankTooLow { required: 8 })
    );
    s.player_mut().experience = 100;
    s.attempt_breakthrough().unwrap();
    s.select_core_ability(AbilityTier::Low, 0).unwrap();
    assert_eq!(
        s.select_core_ability(AbilityTier::Low, 1),
        Err(Rejection::SlotFilled)
    );
    assert_eq!(
        s.select_core_ability(AbilityTier::High, 0),
        Err(Rejection::RankTooLow { required: 6 })
    );
    assert_eq!(s.stat_snapshot().core_abilities.len(), 1);
}

#[test]
fn test_acquired_methods_open_at_rank_five() {
    let catalog = ContentCatalog::new();
    let mut s = session(&catalog);
    assert!(matches!(
        s.learn_acquired_heart_method("jiuyang"),
        Err(Rejection::RankTooLow { .. })
    ));
    assert!(matches!(
        s.learn_acquired_heart_method("no_such_method"),
        Err(Rejection::UnknownId { .. })
    ));

    gain_experience(s.player_mut(), 100 + 200 + 400 + 800);
    assert_eq!(s.player().rank, 5);
    let before = s.player().stats.clone();
    s.learn_acquired_heart_method("jiuyang").unwrap();
    assert!(s.player().knows_heart_method("九阳神功"));
    assert_ne!(s.player().stats, before);
    assert!(matches!(
        s.learn_acquired_heart_method("jiuyang"),
        Err(Rejection::AlreadyLearned { .. })
    ));
}

#[test]
fn test_technique_rows_reflect_requirements() {
    let catalog = ContentCatalog::new();
    let mut s = session(&catalog);
    s.learn_technique("taiji_palm").unwrap();
    let rows = s.technique_rows();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].usable);
    // rank 9 and no 太极心法 yet
    assert!(!rows[1].usable);

    s.learn_inborn_heart_method("taiji").unwrap();
    s.player_mut().experience = 100;
    s.attempt_breakthrough().unwrap();
    assert!(s.technique_rows()[1].usable);
}

#[test]
fn test_breakthrough_failure_leaves_state() {
    let catalog = ContentCatalog::new();
    let mut s = session(&catalog);
    s.player_mut().experience = 99;
    let before = s.stat_snapshot();
    assert!(matches!(
        s.attempt_breakthrough(),
        Err(Rejection::NotEnoughExperience { current: 99, required: 100 })
    ));
    assert_eq!(s.stat_snapshot(), before);
    assert_eq!(s.player().rank, LOWEST_RANK);
}
