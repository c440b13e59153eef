//! The command/query surface a presentation layer drives.
//!
//! `GameSession` owns the player, the current encounter and the combat
//! engine, and does the cross-system routing: monster defeats feed quests
//! and loot, breakthroughs feed level objectives, and every encounter's
//! result is written back to the world.

use super::content::ContentCatalog;
use super::errors::Rejection;
use super::notify::{LogCategory, LogSink, MessageLog, Notice};
use super::world::{Area, Position, World};
use crate::character::monster::Monster;
use crate::character::player::Player;
use crate::combat::logic::{AutoRound, CombatEngine, CombatOutcome, CombatResolution};
use crate::combat::types::{CombatConfig, CombatEvent};
use crate::cultivation::logic::{advance, Breakthrough};
use crate::martial::heart_method::{learn_acquired, learn_inborn, select_core_ability, AbilityTier};
use crate::martial::technique::{available_techniques, learn_technique, TechniqueView};
use crate::quests::data::CAVE_BOSS_ROOM;
use crate::quests::logic::{
    complete_quest, update_collect_objectives, update_explore_objectives, update_kill_objectives,
    update_level_objectives, update_talk_objectives, QuestCompletion,
};
use crate::quests::types::QuestView;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;

/// Read-only view of the player's numbers for a status panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSnapshot {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub qi: u32,
    pub max_qi: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub rank: u8,
    pub realm: &'static str,
    pub experience: u64,
    /// `None` at the summit.
    pub experience_to_next: Option<u64>,
    pub inborn_method: Option<&'static str>,
    pub acquired_methods: Vec<&'static str>,
    pub core_abilities: Vec<&'static str>,
    pub in_combat: bool,
    pub auto_combat: bool,
}

/// How the last encounter ended.
#[derive(Debug, Clone)]
pub struct EncounterSummary {
    pub monster: String,
    pub outcome: CombatOutcome,
    pub resolution: CombatResolution,
}

/// What one call to [`GameSession::tick`] did.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub round: Option<AutoRound>,
    pub monster_event: Option<CombatEvent>,
    pub ended: Option<EncounterSummary>,
}

pub struct GameSession<'c, W: World> {
    catalog: &'c ContentCatalog,
    world: W,
    player: Player,
    engine: CombatEngine,
    encounter: Option<Monster>,
    last_encounter: Option<EncounterSummary>,
    log: MessageLog,
    area: Area,
    position: Position,
    rng: ChaCha8Rng,
}

impl<'c, W: World> GameSession<'c, W> {
    /// A fresh character in 逍遥阁. `seed` drives every non-loot roll.
    pub fn new(catalog: &'c ContentCatalog, world: W, name: &str, seed: u64) -> Self {
        Self {
            catalog,
            world,
            player: Player::new(name),
            engine: CombatEngine::default(),
            encounter: None,
            last_encounter: None,
            log: MessageLog::default(),
            area: Area::Xiaoyao,
            position: Position::new(0, 0),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_combat_config(mut self, config: CombatConfig) -> Self {
        self.engine = CombatEngine::new(config);
        self
    }

    pub fn with_message_capacity(mut self, capacity: usize) -> Self {
        self.log = MessageLog::new(capacity);
        self
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn encounter(&self) -> Option<&Monster> {
        self.encounter.as_ref()
    }

    pub fn last_encounter(&self) -> Option<&EncounterSummary> {
        self.last_encounter.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.engine.in_combat()
    }

    pub fn auto_combat(&self) -> bool {
        self.engine.auto_combat()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The last few combat messages, oldest first.
    pub fn combat_log(&self) -> impl Iterator<Item = &Notice> {
        self.engine.state().log().iter()
    }

    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    pub fn stat_snapshot(&self) -> StatSnapshot {
        let p = &self.player;
        StatSnapshot {
            name: p.name.clone(),
            health: p.stats.health,
            max_health: p.stats.max_health,
            qi: p.stats.qi,
            max_qi: p.stats.max_qi,
            attack: p.stats.attack,
            defense: p.stats.defense,
            speed: p.stats.speed,
            rank: p.rank,
            realm: p.realm_name(),
            experience: p.experience,
            experience_to_next: p.experience_to_next(),
            inborn_method: p.inborn_method_name(),
            acquired_methods: p.acquired_methods.clone(),
            core_abilities: p.core_abilities.clone(),
            in_combat: self.engine.in_combat(),
            auto_combat: self.engine.auto_combat(),
        }
    }

    pub fn quest_views(&self) -> Vec<QuestView> {
        self.player.quests.active_progress()
    }

    pub fn technique_rows(&self) -> Vec<TechniqueView> {
        available_techniques(&self.player, self.catalog.techniques)
    }

    /// Stats and quest progress as one JSON document.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&serde_json::json!({
            "stats": self.stat_snapshot(),
            "quests": self.quest_views(),
            "techniques": self.technique_rows(),
        }))
    }

    // ── Combat commands ──────────────────────────────────────────────────

    /// Starts a fight with whatever stands on `pos`.
    pub fn engage_at(&mut self, pos: Position, now: Instant) -> Result<&Monster, Rejection> {
        if self.engine.in_combat() {
            return Err(Rejection::AlreadyInCombat);
        }
        let monster = self
            .world
            .monster_at(pos)
            .ok_or_else(|| Rejection::UnknownId {
                kind: "monster",
                id: format!("({}, {})", pos.x, pos.y),
            })?;
        self.position = pos;
        self.engine.start_combat(&monster, now);
        self.drain_engine();
        Ok(self.encounter.insert(monster))
    }

    pub fn attack(&mut self, now: Instant) -> Result<CombatEvent, Rejection> {
        let result = match self.encounter.as_mut() {
            Some(monster) => self.engine.player_attack(&mut self.player, monster, now),
            None => Err(Rejection::NotInCombat),
        };
        self.settle();
        result
    }

    pub fn special_attack(&mut self, now: Instant) -> Result<CombatEvent, Rejection> {
        let result = match self.encounter.as_mut() {
            Some(monster) => self.engine.player_special_attack(&mut self.player, monster, now),
            None => Err(Rejection::NotInCombat),
        };
        self.settle();
        result
    }

    pub fn defend(&mut self, now: Instant) -> Result<CombatEvent, Rejection> {
        let result = match self.encounter.as_ref() {
            Some(monster) => self.engine.player_defend(&mut self.player, monster, now),
            None => Err(Rejection::NotInCombat),
        };
        self.settle();
        result
    }

    pub fn use_technique(&mut self, index: usize, now: Instant) -> Result<CombatEvent, Rejection> {
        let result = match self.encounter.as_mut() {
            Some(monster) => self.engine.use_technique(
                &mut self.player,
                monster,
                self.catalog.techniques,
                index,
                now,
                &mut self.rng,
            ),
            None => Err(Rejection::NotInCombat),
        };
        self.settle();
        result
    }

    pub fn toggle_auto_combat(&mut self, now: Instant) -> Result<bool, Rejection> {
        let result = self.engine.toggle_auto_combat(now);
        self.drain_engine();
        result
    }

    /// Advances the fight: one auto round, or in manual mode the monster's
    /// strike once the pacing window reopens.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        if let Some(monster) = self.encounter.as_mut() {
            if self.engine.auto_combat() {
                report.round =
                    self.engine
                        .update_auto_combat(&mut self.player, monster, now, &mut self.rng);
            } else {
                report.monster_event =
                    self.engine
                        .monster_turn(&mut self.player, monster, now, &mut self.rng);
            }
        }
        report.ended = self.settle();
        report
    }

    /// Walks away; the monster keeps its wounds.
    pub fn flee(&mut self) -> Result<EncounterSummary, Rejection> {
        let monster = self.encounter.take().ok_or(Rejection::NotInCombat)?;
        let resolution = self
            .engine
            .end_combat(&mut self.player, &monster, CombatOutcome::Fled, &mut self.rng);
        self.world.update_monster_state(&monster);
        self.drain_engine();
        Ok(self.record(&monster, CombatOutcome::Fled, resolution))
    }

    /// Resolves the encounter once either side has fallen.
    fn settle(&mut self) -> Option<EncounterSummary> {
        self.drain_engine();
        let monster_down = !self.encounter.as_ref()?.stats.is_alive();
        let player_down = !self.player.stats.is_alive();
        if !monster_down && !player_down {
            return None;
        }
        let monster = self.encounter.take()?;

        let summary = if monster_down {
            self.resolve_victory(&monster)
        } else {
            self.resolve_defeat(&monster)
        };
        self.world.update_monster_state(&monster);
        Some(summary)
    }

    fn resolve_victory(&mut self, monster: &Monster) -> EncounterSummary {
        let resolution = self
            .engine
            .end_combat(&mut self.player, monster, CombatOutcome::Victory, &mut self.rng);
        self.drain_engine();

        for name in &resolution.dropped {
            let notices = update_collect_objectives(&mut self.player.quests, name);
            self.log.extend_notices(notices);
        }
        let notices = update_kill_objectives(&mut self.player.quests, &monster.name);
        self.log.extend_notices(notices);
        self.route_breakthroughs(&resolution.breakthroughs);

        // A damage-over-time tick can drop both sides in the same turn.
        if !self.player.stats.is_alive() {
            self.player.revive();
        }
        self.record(monster, CombatOutcome::Victory, resolution)
    }

    fn resolve_defeat(&mut self, monster: &Monster) -> EncounterSummary {
        self.log
            .push("你被击败了，生命值已耗尽！".to_string(), LogCategory::Combat);
        self.log.push(
            "你被救助回逍遥阁，恢复了一半生命值".to_string(),
            LogCategory::System,
        );
        let resolution = self
            .engine
            .end_combat(&mut self.player, monster, CombatOutcome::Defeat, &mut self.rng);
        self.drain_engine();
        self.player.revive();
        self.area = Area::Xiaoyao;
        log::info!("{} was defeated by {}", self.player.name, monster.name);
        self.record(monster, CombatOutcome::Defeat, resolution)
    }

    fn record(
        &mut self,
        monster: &Monster,
        outcome: CombatOutcome,
        resolution: CombatResolution,
    ) -> EncounterSummary {
        let summary = EncounterSummary {
            monster: monster.name.clone(),
            outcome,
            resolution,
        };
        self.last_encounter = Some(summary.clone());
        summary
    }

    fn drain_engine(&mut self) {
        let notices = self.engine.take_notices();
        self.log.extend_notices(notices);
    }

    fn route_breakthroughs(&mut self, breakthroughs: &[Breakthrough]) {
        for breakthrough in breakthroughs {
            if let Some(ability) = breakthrough.unlocked_ability {
                self.log
                    .push(format!("你领悟了新的武学：{}", ability), LogCategory::Success);
            }
            let notices = update_level_objectives(&mut self.player.quests, breakthrough.rank);
            self.log.extend_notices(notices);
        }
    }

    /// Echoes warning-class rejections to the message log.
    fn warn(&mut self, rejection: Rejection) -> Rejection {
        if rejection.is_warning() {
            self.log.push(rejection.to_string(), LogCategory::Warning);
        }
        rejection
    }

    fn ok_or_warn(
        &mut self,
        result: Result<String, Rejection>,
        category: LogCategory,
    ) -> Result<String, Rejection> {
        match result {
            Ok(message) => {
                self.log.push(message.clone(), category);
                Ok(message)
            }
            Err(rejection) => Err(self.warn(rejection)),
        }
    }

    // ── Inventory ────────────────────────────────────────────────────────

    pub fn use_item(&mut self, index: usize) -> Result<String, Rejection> {
        let result = self.player.use_item(index);
        self.ok_or_warn(result, LogCategory::Item)
    }

    pub fn equip(&mut self, index: usize) -> Result<String, Rejection> {
        let result = self.player.equip(index);
        self.ok_or_warn(result, LogCategory::Item)
    }

    // ── Cultivation & martial arts ───────────────────────────────────────

    pub fn attempt_breakthrough(&mut self) -> Result<Breakthrough, Rejection> {
        match advance(&mut self.player) {
            Ok(breakthrough) => {
                self.log.push(breakthrough.message(), LogCategory::Success);
                self.route_breakthroughs(std::slice::from_ref(&breakthrough));
                Ok(breakthrough)
            }
            Err(rejection) => Err(self.warn(rejection)),
        }
    }

    /// Accepts a catalog key (`"taiji"`) or display name.
    pub fn learn_inborn_heart_method(&mut self, key: &str) -> Result<String, Rejection> {
        let result = match self.catalog.inborn_method(key) {
            Some(method) => learn_inborn(&mut self.player, method),
            None => Err(Rejection::UnknownId {
                kind: "heart_method",
                id: key.to_string(),
            }),
        };
        self.ok_or_warn(result, LogCategory::Success)
    }

    pub fn select_core_ability(&mut self, tier: AbilityTier, index: usize) -> Result<String, Rejection> {
        let method = self
            .player
            .inborn_method_name()
            .and_then(|name| self.catalog.inborn_method(name));
        let result = match method {
            Some(method) => select_core_ability(&mut self.player, method, tier, index),
            None => Err(Rejection::NoInbornMethod),
        };
        self.ok_or_warn(result, LogCategory::Success)
    }

    pub fn learn_acquired_heart_method(&mut self, key: &str) -> Result<String, Rejection> {
        let result = match self.catalog.acquired_method(key) {
            Some(method) => learn_acquired(&mut self.player, method),
            None => Err(Rejection::UnknownId {
                kind: "heart_method",
                id: key.to_string(),
            }),
        };
        self.ok_or_warn(result, LogCategory::Success)
    }

    pub fn learn_technique(&mut self, id: &str) -> Result<String, Rejection> {
        let result = match self.catalog.technique(id) {
            Some(def) => learn_technique(&mut self.player, def),
            None => Err(Rejection::UnknownId {
                kind: "technique",
                id: id.to_string(),
            }),
        };
        self.ok_or_warn(result, LogCategory::Success)
    }

    // ── Exploration & quests ─────────────────────────────────────────────

    /// Moves the player; entering the cave's deep chamber counts as
    /// exploring it.
    pub fn explore(&mut self, area: Area, pos: Position) -> Result<(), Rejection> {
        if self.engine.in_combat() {
            return Err(Rejection::AlreadyInCombat);
        }
        self.area = area;
        self.position = pos;
        let notices = update_explore_objectives(&mut self.player.quests, area.id());
        self.log.extend_notices(notices);
        if area.is_boss_room(pos) {
            let notices = update_explore_objectives(&mut self.player.quests, CAVE_BOSS_ROOM);
            self.log.extend_notices(notices);
        }
        Ok(())
    }

    /// Talks to an NPC: advances talk objectives and offers the quests the
    /// NPC hands out. Returns the ids newly offered.
    pub fn talk_to(&mut self, npc: &str) -> Vec<u32> {
        let notices = update_talk_objectives(&mut self.player.quests, npc);
        self.log.extend_notices(notices);

        let mut offered = Vec::new();
        for template in self.catalog.quests_from(npc) {
            if self.player.quests.offer(template) {
                offered.push(template.id);
                self.log.push(
                    format!("{}有任务交给你：「{}」", npc, template.title),
                    LogCategory::Quest,
                );
            }
        }
        offered
    }

    pub fn accept_quest(&mut self, id: u32) -> Result<(), Rejection> {
        match self.player.quests.accept(id) {
            Ok(quest) => {
                let message = format!("接受任务：{}", quest.title);
                self.log.push(message, LogCategory::Quest);
                Ok(())
            }
            Err(rejection) => Err(self.warn(rejection)),
        }
    }

    pub fn complete_quest(&mut self, id: u32) -> Result<QuestCompletion, Rejection> {
        let completion = match complete_quest(&mut self.player, id) {
            Ok(completion) => completion,
            Err(rejection) => return Err(self.warn(rejection)),
        };
        self.log
            .push(completion.summary.clone(), LogCategory::Success);
        for breakthrough in &completion.breakthroughs {
            self.log.push(breakthrough.message(), LogCategory::Success);
        }
        self.route_breakthroughs(&completion.breakthroughs);
        for result in &completion.item_results {
            if let Err(rejection) = result {
                self.log.push(rejection.to_string(), LogCategory::Warning);
            }
        }
        Ok(completion)
    }
}
