//! Integration test: engage -> act -> resolve through a GameSession
//!
//! Drives whole encounters against an in-memory monster roster with a
//! synthetic clock, covering pacing, auto-combat, techniques and the
//! victory/defeat/flee write-back to the world.

use jianghu::character::monster::{GREY_WOLF, TIGER, WILD_BOAR};
use jianghu::combat::{CombatEvent, CombatOutcome};
use jianghu::core::content::ContentCatalog;
use jianghu::core::errors::Rejection;
use jianghu::core::session::GameSession;
use jianghu::core::world::{MonsterRoster, Position, World};
use std::time::{Duration, Instant};

const WOLF_AT: Position = Position::new(6, 6);
const TIGER_AT: Position = Position::new(7, 6);
const BOAR_AT: Position = Position::new(8, 6);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn new_session(catalog: &ContentCatalog) -> GameSession<'_, MonsterRoster> {
    let mut roster = MonsterRoster::new();
    roster.place(WOLF_AT, &GREY_WOLF);
    roster.place(TIGER_AT, &TIGER);
    roster.place(BOAR_AT, &WILD_BOAR);
    GameSession::new(catalog, roster, "少侠", 2024).with_message_capacity(128)
}

// =========================================================================
// Manual pacing
// =========================================================================

#[test]
fn test_manual_actions_wait_for_the_pacing_window() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(WOLF_AT, t0).unwrap();

    assert_eq!(session.attack(t0 + ms(100)), Err(Rejection::Paced));
    assert_eq!(session.attack(t0 + ms(699)), Err(Rejection::Paced));
    // attack 25 against defense 3
    assert_eq!(
        session.attack(t0 + ms(700)),
        Ok(CombatEvent::PlayerAttack { damage: 22 })
    );
    assert_eq!(session.encounter().unwrap().stats.health, 8);
    assert_eq!(session.defend(t0 + ms(1000)), Err(Rejection::Paced));
}

#[test]
fn test_paced_rejection_is_not_logged() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(WOLF_AT, t0).unwrap();
    let before = session.messages().len();
    let _ = session.attack(t0);
    assert_eq!(session.messages().len(), before);
}

#[test]
fn test_special_attack_kills_wolf_in_one_blow() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(WOLF_AT, t0).unwrap();

    // 气力拳: floor(25 * 1.5) = 37 raw, 34 after defense
    let event = session.special_attack(t0 + ms(700)).unwrap();
    assert_eq!(
        event,
        CombatEvent::SpecialAttack {
            ability: "气力拳",
            qi_cost: 10,
            damage: 34
        }
    );
    assert!(!session.in_combat());
    assert_eq!(session.player().stats.qi, 40);
    let summary = session.last_encounter().unwrap();
    assert_eq!(summary.outcome, CombatOutcome::Victory);
    assert!(!summary.resolution.dropped.is_empty());
    assert!(session.world().monster_at(WOLF_AT).is_none());
    assert!(session.messages().contains("战斗胜利! 你击败了灰狼，获得20点经验！"));
}

#[test]
fn test_manual_special_without_qi_consumes_the_window() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();
    session.player_mut().stats.qi = 3;

    let result = session.special_attack(t0 + ms(700));
    assert!(matches!(result, Err(Rejection::InsufficientQi { .. })));
    assert!(session.messages().contains("内力不足，无法使用气力拳！"));
    assert_eq!(session.attack(t0 + ms(800)), Err(Rejection::Paced));
    assert!(session.attack(t0 + ms(1400)).is_ok());
}

#[test]
fn test_defend_restores_qi() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(BOAR_AT, t0).unwrap();
    session.player_mut().stats.qi = 20;

    assert_eq!(
        session.defend(t0 + ms(700)),
        Ok(CombatEvent::Defended { qi_restored: 5 })
    );
    assert_eq!(session.player().stats.qi, 25);
    assert!(session.messages().contains("你进入防御姿态，恢复5点内力！"));
}

// =========================================================================
// Monster turns and auto-combat
// =========================================================================

#[test]
fn test_monster_strikes_when_window_reopens() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();

    assert!(session.tick(t0 + ms(300)).monster_event.is_none());
    let report = session.tick(t0 + ms(700));
    assert!(report.monster_event.is_some());
    assert!(session.player().stats.health < session.player().stats.max_health);
}

#[test]
fn test_auto_combat_waits_for_its_delay() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();
    assert_eq!(session.toggle_auto_combat(t0), Ok(true));
    assert!(session.messages().contains("已开启自动战斗"));

    assert!(session.tick(t0 + ms(799)).round.is_none());
    let round = session.tick(t0 + ms(800)).round.unwrap();
    assert_eq!(round.round, 1);
    assert!(session.messages().contains("-------- 第1回合 --------"));
    assert!(session.tick(t0 + ms(900)).round.is_none());
}

#[test]
fn test_auto_combat_finishes_the_fight() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(WOLF_AT, t0).unwrap();
    session.toggle_auto_combat(t0).unwrap();

    let mut now = t0;
    let mut ended = None;
    for _ in 0..20 {
        now += ms(800);
        ended = session.tick(now).ended;
        if ended.is_some() {
            break;
        }
    }
    let ended = ended.expect("wolf should fall within 20 rounds");
    assert_eq!(ended.outcome, CombatOutcome::Victory);
    assert_eq!(ended.resolution.experience, 20);
    assert!(!session.auto_combat());
    assert!(session.combat_log().count() <= 5);
}

#[test]
fn test_combat_log_keeps_last_five() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(BOAR_AT, t0).unwrap();
    session.player_mut().stats.attack = 8;

    let mut now = t0;
    for _ in 0..4 {
        now += ms(700);
        let _ = session.attack(now);
        now += ms(700);
        session.tick(now);
    }
    let log: Vec<_> = session.combat_log().collect();
    assert_eq!(log.len(), 5);
    assert!(log.iter().all(|n| !n.message.starts_with("开始与")));
}

// =========================================================================
// Techniques
// =========================================================================

#[test]
fn test_technique_cooldown_and_counter_stance() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    session.learn_inborn_heart_method("taiji").unwrap();
    session.learn_technique("taiji_palm").unwrap();
    session.player_mut().rank = 8;

    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();
    let event = session.use_technique(1, t0 + ms(700)).unwrap();
    assert!(matches!(event, CombatEvent::TechniqueUsed { name: "太极掌", .. }));
    assert!(session.messages().contains("摆出反击架势"));

    let rows = session.technique_rows();
    assert_eq!(rows[1].cooldown, 2);
    assert!(!rows[1].usable);
    assert!(matches!(
        session.use_technique(1, t0 + ms(1400)),
        Err(Rejection::OnCooldown { .. })
    ));
    assert!(matches!(
        session.use_technique(9, t0 + ms(1400)),
        Err(Rejection::UnknownIndex { index: 9 })
    ));
}

// =========================================================================
// Leaving an encounter
// =========================================================================

#[test]
fn test_flee_writes_wounds_back() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();
    session.attack(t0 + ms(700)).unwrap();
    let wounded = session.encounter().unwrap().stats.health;

    let summary = session.flee().unwrap();
    assert_eq!(summary.outcome, CombatOutcome::Fled);
    assert_eq!(summary.resolution.experience, 0);
    assert_eq!(session.world().monster_at(TIGER_AT).unwrap().stats.health, wounded);

    session.engage_at(TIGER_AT, t0 + ms(2000)).unwrap();
    assert_eq!(session.encounter().unwrap().stats.health, wounded);
}

#[test]
fn test_defeat_sends_player_home() {
    let catalog = ContentCatalog::new();
    let mut session = new_session(&catalog);
    let t0 = Instant::now();
    session.engage_at(TIGER_AT, t0).unwrap();
    session.player_mut().stats.health = 1;
    session.player_mut().stats.defense = 0;

    let ended = session.tick(t0 + ms(700)).ended.unwrap();
    assert_eq!(ended.outcome, CombatOutcome::Defeat);
    assert_eq!(session.player().stats.health, 100);
    assert_eq!(session.player().experience, 0);
    assert!(session.messages().contains("你被击败了，生命值已耗尽！"));
    assert!(session.world().monster_at(TIGER_AT).is_some());
}
