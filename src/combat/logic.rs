use super::abilities::{choose_special, SpecialChoice, BASIC_STRIKE};
use super::policy::{choose_auto_action, AutoAction};
use super::types::{CombatConfig, CombatEvent, CombatState};
use crate::character::monster::Monster;
use crate::character::player::Player;
use crate::character::stats::HasStatusEffects;
use crate::core::constants::*;
use crate::core::errors::Rejection;
use crate::core::notify::{LogCategory, Notice};
use crate::cultivation::logic::{gain_experience, Breakthrough};
use crate::items::drops::generate_monster_drop;
use crate::martial::technique::{check_usable, execute, find_technique, tick_cooldowns, TechniqueDef};
use rand::Rng;
use std::time::Instant;

/// One resolved auto-combat round.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRound {
    pub round: u32,
    pub action: AutoAction,
    pub events: Vec<CombatEvent>,
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Spoils of a finished encounter.
#[derive(Debug, Clone, Default)]
pub struct CombatResolution {
    pub experience: u64,
    pub breakthroughs: Vec<Breakthrough>,
    /// Names of every item that dropped, whether or not it fit in the bag.
    pub dropped: Vec<String>,
}

/// Resolves a single player-versus-monster encounter.
///
/// Every message is kept in the bounded combat log and also queued for the
/// session's log sink; drain the queue with [`CombatEngine::take_notices`].
#[derive(Debug, Clone)]
pub struct CombatEngine {
    pub config: CombatConfig,
    state: CombatState,
    outbox: Vec<Notice>,
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            state: CombatState::new(config.log_capacity),
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn in_combat(&self) -> bool {
        self.state.active
    }

    pub fn auto_combat(&self) -> bool {
        self.state.auto_combat
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.outbox)
    }

    fn add_log(&mut self, message: String, category: LogCategory) {
        self.state.add_log_entry(message.clone(), category);
        self.outbox.push(Notice::new(message, category));
    }

    /// Logs warning-class rejections and hands the rejection back.
    fn reject(&mut self, rejection: Rejection) -> Rejection {
        if rejection.is_warning() {
            self.add_log(rejection.to_string(), LogCategory::Warning);
        }
        log::trace!("combat action rejected: {:?}", rejection);
        rejection
    }

    fn manual_window_open(&self, now: Instant) -> bool {
        self.state
            .last_action_at
            .map_or(true, |t| now.saturating_duration_since(t) >= self.config.action_delay)
    }

    fn check_action(&self, player: &Player, monster: &Monster, now: Instant) -> Result<(), Rejection> {
        if !self.state.active {
            return Err(Rejection::NotInCombat);
        }
        if !self.state.auto_combat && !self.manual_window_open(now) {
            return Err(Rejection::Paced);
        }
        if !player.stats.is_alive() || !monster.stats.is_alive() {
            return Err(Rejection::NotAlive);
        }
        Ok(())
    }

    pub fn start_combat(&mut self, monster: &Monster, now: Instant) {
        self.state = CombatState::new(self.config.log_capacity);
        self.state.active = true;
        self.state.last_action_at = Some(now);
        self.state.last_auto_action_at = Some(now);
        log::debug!("combat started against {} #{}", monster.name, monster.id);
        self.add_log(format!("开始与{}战斗！", monster.name), LogCategory::Combat);
    }

    /// Flips auto-combat; the first automatic round waits a full delay.
    pub fn toggle_auto_combat(&mut self, now: Instant) -> Result<bool, Rejection> {
        if !self.state.active {
            return Err(Rejection::NotInCombat);
        }
        self.state.auto_combat = !self.state.auto_combat;
        let message = if self.state.auto_combat {
            "已开启自动战斗"
        } else {
            "已关闭自动战斗"
        };
        self.add_log(message.to_string(), LogCategory::System);
        self.state.last_auto_action_at = Some(now);
        Ok(self.state.auto_combat)
    }

    pub fn player_attack(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        now: Instant,
    ) -> Result<CombatEvent, Rejection> {
        self.check_action(player, monster, now)
            .map_err(|r| self.reject(r))?;

        let damage = monster
            .stats
            .take_damage(BASIC_STRIKE.raw_damage(player.stats.attack));
        self.add_log(
            format!("你攻击{}，造成{}点伤害！", monster.name, damage),
            LogCategory::Combat,
        );
        self.state.player_defending = false;
        self.state.last_action_at = Some(now);
        Ok(CombatEvent::PlayerAttack { damage })
    }

    /// Uses the strongest special ability the player can pay for.
    ///
    /// Without enough qi, auto-combat falls back to a basic attack; a manual
    /// attempt only logs the warning but still uses up the pacing window.
    pub fn player_special_attack(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        now: Instant,
    ) -> Result<CombatEvent, Rejection> {
        self.check_action(player, monster, now)
            .map_err(|r| self.reject(r))?;

        let ability = match choose_special(&player.abilities, player.stats.qi) {
            SpecialChoice::Affordable(ability) => ability,
            SpecialChoice::NoneKnown => BASIC_STRIKE,
            SpecialChoice::Unaffordable(ability) => {
                let rejection = self.reject(Rejection::InsufficientQi {
                    ability: ability.name.to_string(),
                    cost: ability.qi_cost,
                    available: player.stats.qi,
                });
                if self.state.auto_combat {
                    return self.player_attack(player, monster, now);
                }
                self.state.last_action_at = Some(now);
                return Err(rejection);
            }
        };

        player.stats.spend_qi(ability.qi_cost);
        let damage = monster
            .stats
            .take_damage(ability.raw_damage(player.stats.attack));
        self.add_log(
            format!(
                "你使用{}，消耗{}点内力，造成{}点伤害！",
                ability.name, ability.qi_cost, damage
            ),
            LogCategory::Combat,
        );
        self.state.player_defending = false;
        self.state.last_action_at = Some(now);
        Ok(CombatEvent::SpecialAttack {
            ability: ability.name,
            qi_cost: ability.qi_cost,
            damage,
        })
    }

    pub fn player_defend(
        &mut self,
        player: &mut Player,
        monster: &Monster,
        now: Instant,
    ) -> Result<CombatEvent, Rejection> {
        self.check_action(player, monster, now)
            .map_err(|r| self.reject(r))?;

        let restore = DEFEND_MIN_QI_RESTORE
            .max((player.stats.max_qi as f64 * DEFEND_QI_RESTORE_RATIO) as u32);
        let qi_restored = player.stats.restore_qi(restore);
        self.state.player_defending = true;
        self.add_log(
            format!("你进入防御姿态，恢复{}点内力！", restore),
            LogCategory::Combat,
        );
        self.state.last_action_at = Some(now);
        Ok(CombatEvent::Defended { qi_restored })
    }

    /// Uses the learned technique at `index` against the monster.
    pub fn use_technique(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        catalog: &[TechniqueDef],
        index: usize,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Result<CombatEvent, Rejection> {
        self.check_action(player, monster, now)
            .map_err(|r| self.reject(r))?;

        let learned = player
            .techniques
            .get(index)
            .ok_or(Rejection::UnknownIndex { index })
            .map_err(|r| self.reject(r))?;
        let def = find_technique(catalog, learned.id)
            .ok_or_else(|| Rejection::UnknownId {
                kind: "technique",
                id: learned.id.to_string(),
            })
            .map_err(|r| self.reject(r))?;
        check_usable(def, learned, player).map_err(|r| self.reject(r))?;

        let outcome = execute(
            def,
            &mut player.techniques[index],
            &mut player.stats,
            &mut monster.stats,
            rng,
        );
        if let Some(ratio) = outcome.counter_ratio {
            self.state.counter_ratio = Some(ratio);
        }
        let mut message = format!("你使用{}，造成{}点伤害！", def.name, outcome.damage);
        if !outcome.description.is_empty() {
            message.push_str(&outcome.description);
        }
        self.add_log(message, LogCategory::Combat);
        self.state.player_defending = false;
        self.state.last_action_at = Some(now);
        Ok(CombatEvent::TechniqueUsed {
            name: def.name,
            damage: outcome.damage,
        })
    }

    /// The monster's strike, without any pacing check.
    pub fn monster_attack(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Option<CombatEvent> {
        if !player.stats.is_alive() || !monster.stats.is_alive() {
            return None;
        }
        self.state.last_action_at = Some(now);

        if monster.stats.status.stunned {
            monster.stats.status.stunned = false;
            self.add_log(format!("{}被眩晕，无法行动！", monster.name), LogCategory::Combat);
            return Some(CombatEvent::MonsterStunned);
        }

        if self.state.player_defending && rng.gen::<f64>() < DEFEND_BLOCK_CHANCE {
            self.add_log(format!("{}的攻击被你格挡了！", monster.name), LogCategory::Combat);
            return Some(CombatEvent::MonsterBlocked);
        }

        let variance = rng.gen_range(-MONSTER_DAMAGE_VARIANCE..MONSTER_DAMAGE_VARIANCE);
        let mut raw = (monster.stats.attack as f64 * (1.0 + variance)) as u32;
        if self.state.player_defending {
            raw /= 2;
        }
        let damage = player.stats.take_damage(raw);
        self.add_log(
            format!("{}攻击你，造成{}点伤害！", monster.name, damage),
            LogCategory::Combat,
        );

        if let Some(ratio) = self.state.counter_ratio.take() {
            let reflected = ((damage as f64 * ratio) as u32).max(MIN_DAMAGE);
            monster.stats.lose_health(reflected);
            self.add_log(
                format!("你的反击架势反弹了{}点伤害！", reflected),
                LogCategory::Combat,
            );
            return Some(CombatEvent::CounterReflected { damage, reflected });
        }
        Some(CombatEvent::MonsterAttack { damage })
    }

    /// Manual mode: the monster strikes whenever the pacing window is open,
    /// then the turn is closed out.
    pub fn monster_turn(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Option<CombatEvent> {
        if !self.state.active || self.state.auto_combat || !self.manual_window_open(now) {
            return None;
        }
        let event = self.monster_attack(player, monster, now, rng)?;
        self.end_turn(player, monster);
        Some(event)
    }

    /// Closes a turn: cooldowns tick, damage over time lands on both sides,
    /// the player's stun wears off.
    pub fn end_turn(&mut self, player: &mut Player, monster: &mut Monster) {
        tick_cooldowns(&mut player.techniques);

        let tick = monster.end_of_turn();
        if tick.total() > 0 {
            self.add_log(
                format!("{}受到{}点持续伤害", monster.name, tick.total()),
                LogCategory::Combat,
            );
        }
        let tick = player.end_of_turn();
        if tick.total() > 0 {
            self.add_log(format!("你受到{}点持续伤害", tick.total()), LogCategory::Combat);
        }
        player.stats.status.stunned = false;
    }

    /// Runs one auto-combat round if enabled, both sides live and the auto
    /// delay has passed.
    pub fn update_auto_combat(
        &mut self,
        player: &mut Player,
        monster: &mut Monster,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Option<AutoRound> {
        if !self.state.active
            || !self.state.auto_combat
            || !player.stats.is_alive()
            || !monster.stats.is_alive()
        {
            return None;
        }
        let due = self.state.last_auto_action_at.map_or(true, |t| {
            now.saturating_duration_since(t) >= self.config.auto_combat_delay
        });
        if !due {
            return None;
        }

        self.state.round += 1;
        let round = self.state.round;
        self.add_log(format!("-------- 第{}回合 --------", round), LogCategory::System);

        let action = choose_auto_action(&player.stats, &monster.stats, rng);
        let mut events = Vec::new();
        let first = match action {
            AutoAction::Attack => self.player_attack(player, monster, now),
            AutoAction::Special => self.player_special_attack(player, monster, now),
            AutoAction::Defend => self.player_defend(player, monster, now),
        };
        if let Ok(event) = first {
            events.push(event);
        }
        if monster.stats.is_alive() {
            events.extend(self.monster_attack(player, monster, now, rng));
        }
        self.end_turn(player, monster);
        self.state.last_auto_action_at = Some(now);

        Some(AutoRound {
            round,
            action,
            events,
        })
    }

    /// Finishes the encounter. Victory pays out experience and loot; every
    /// outcome switches auto-combat and the defend stance off.
    pub fn end_combat(
        &mut self,
        player: &mut Player,
        monster: &Monster,
        outcome: CombatOutcome,
        rng: &mut impl Rng,
    ) -> CombatResolution {
        self.state.clear_log();
        self.state.active = false;
        self.state.auto_combat = false;
        self.state.player_defending = false;
        self.state.counter_ratio = None;

        if outcome != CombatOutcome::Victory {
            self.add_log("你离开了战斗。".to_string(), LogCategory::System);
            return CombatResolution::default();
        }

        let experience = monster.experience_reward as u64;
        let breakthroughs = gain_experience(player, experience);
        self.add_log(
            format!(
                "战斗胜利! 你击败了{}，获得{}点经验！",
                monster.name, experience
            ),
            LogCategory::Success,
        );
        for breakthrough in &breakthroughs {
            self.add_log(breakthrough.message(), LogCategory::Success);
        }

        let drops = generate_monster_drop(&monster.name, player.rank, rng);
        log::debug!("{} dropped {} item(s)", monster.name, drops.len());
        let mut dropped = Vec::with_capacity(drops.len());
        for item in drops {
            dropped.push(item.name.clone());
            match player.add_item(item) {
                Ok(message) => self.add_log(message, LogCategory::Item),
                Err(rejection) => self.add_log(rejection.to_string(), LogCategory::Warning),
            }
        }

        CombatResolution {
            experience,
            breakthroughs,
            dropped,
        }
    }
}
