//! Drives real game sessions headlessly with the auto-combat policy.
//!
//! Every run goes through `GameSession`, so the numbers reflect actual
//! combat, loot and quest behavior rather than a parallel model.

use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::logic::CombatOutcome;
use crate::combat::types::CombatConfig;
use crate::core::constants::NUM_REALMS;
use crate::core::content::ContentCatalog;
use crate::core::session::GameSession;
use crate::core::world::{Area, MonsterRoster, Position, CAVE_BOSS_POSITION};
use crate::items::types::{ConsumableEffect, ItemKind};
use crate::martial::heart_method::AbilityTier;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;

/// Auto rounds allowed per encounter before the player walks away.
const MAX_ROUNDS_PER_ENCOUNTER: u32 = 200;

/// Totals for one simulated character.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub final_rank: u8,
    pub encounters: u64,
    pub victories: u64,
    pub deaths: u64,
    pub flees: u64,
    /// Indexed by realm rank at the start of the encounter.
    pub encounters_per_rank: Vec<u64>,
    pub deaths_per_rank: Vec<u64>,
    pub items_dropped: u64,
    pub potions_used: u64,
    pub quests_completed: u64,
    pub reached_target: bool,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let catalog = ContentCatalog::new();
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(run_idx as u64),
            None => rand::thread_rng().gen(),
        };
        let stats = simulate_single_run(config, &catalog, seed);
        if config.verbosity >= 2 {
            log::info!(
                "run {}/{}: rank {}, {} encounters, {} deaths, {} quests",
                run_idx + 1,
                config.num_runs,
                stats.final_rank,
                stats.encounters,
                stats.deaths,
                stats.quests_completed
            );
        }
        runs.push(stats);
    }

    SimReport::from_runs(runs, config.target_rank)
}

/// Where a character of this rank goes hunting.
fn hunting_ground(rank: u8) -> Area {
    match rank {
        8.. => Area::Forest,
        6..=7 => Area::Mountain,
        _ => Area::Cave,
    }
}

fn nearest_monster(roster: &MonsterRoster) -> Option<Position> {
    roster.monsters().first().map(|p| p.position)
}

/// Drinks a healing consumable when below half health. Returns whether one
/// was used.
fn patch_up(session: &mut GameSession<'_, MonsterRoster>) -> bool {
    let stats = &session.player().stats;
    if stats.health * 2 >= stats.max_health {
        return false;
    }
    let potion = session.player().inventory.items().iter().position(|item| {
        matches!(&item.kind, ItemKind::Consumable { effects, .. }
            if effects.iter().any(|e| matches!(e, ConsumableEffect::RestoreHealth(_))))
    });
    potion.is_some_and(|index| session.use_item(index).is_ok())
}

fn simulate_single_run(config: &SimConfig, catalog: &ContentCatalog, seed: u64) -> RunStats {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = GameSession::new(catalog, MonsterRoster::new(), "SimPlayer", seed);
    let auto_delay = CombatConfig::default().auto_combat_delay;
    let mut now = Instant::now();

    let mut stats = RunStats {
        encounters_per_rank: vec![0; NUM_REALMS],
        deaths_per_rank: vec![0; NUM_REALMS],
        ..Default::default()
    };

    let _ = session.learn_inborn_heart_method("taiji");
    if config.simulate_quests {
        for npc in catalog.quests.iter().map(|q| q.npc.clone()) {
            for id in session.talk_to(&npc) {
                let _ = session.accept_quest(id);
            }
        }
    }

    let mut area = session.area();
    while stats.encounters < config.max_encounters as u64 {
        let rank = session.player().rank;
        if rank <= config.target_rank {
            break;
        }

        let ground = hunting_ground(rank);
        if ground != area || session.world().is_empty() {
            *session.world_mut() = MonsterRoster::spawn(ground, &mut rng);
            area = ground;
        }
        if session.area() != ground {
            let _ = session.explore(ground, Position::new(10, 10));
        }
        if ground == Area::Cave {
            let _ = session.explore(ground, CAVE_BOSS_POSITION);
        }

        if patch_up(&mut session) {
            stats.potions_used += 1;
        }
        let Some(pos) = nearest_monster(session.world()) else {
            continue;
        };
        now += auto_delay;
        if session.engage_at(pos, now).is_err() {
            continue;
        }
        stats.encounters += 1;
        stats.encounters_per_rank[rank as usize] += 1;
        let _ = session.toggle_auto_combat(now);

        let mut ended = None;
        for _ in 0..MAX_ROUNDS_PER_ENCOUNTER {
            now += auto_delay;
            ended = session.tick(now).ended;
            if ended.is_some() {
                break;
            }
        }
        let summary = match ended {
            Some(summary) => summary,
            None => match session.flee() {
                Ok(summary) => summary,
                Err(_) => continue,
            },
        };

        match summary.outcome {
            CombatOutcome::Victory => {
                stats.victories += 1;
                stats.items_dropped += summary.resolution.dropped.len() as u64;
                if !summary.resolution.breakthroughs.is_empty() {
                    let _ = session.select_core_ability(AbilityTier::Low, 0);
                    let _ = session.select_core_ability(AbilityTier::High, 0);
                }
            }
            CombatOutcome::Defeat => {
                stats.deaths += 1;
                stats.deaths_per_rank[rank as usize] += 1;
                area = session.area();
            }
            CombatOutcome::Fled => stats.flees += 1,
        }

        if config.simulate_quests {
            let ready: Vec<u32> = session
                .quest_views()
                .into_iter()
                .filter(|q| q.ready_to_turn_in)
                .map(|q| q.id)
                .collect();
            for id in ready {
                if session.complete_quest(id).is_ok() {
                    stats.quests_completed += 1;
                }
            }
        }
    }

    let player = session.player();
    stats.final_rank = player.rank;
    stats.reached_target = player.rank <= config.target_rank;
    log::debug!(
        "seed {} finished at {} after {} encounters",
        seed,
        player.realm_name(),
        stats.encounters
    );
    stats
}
