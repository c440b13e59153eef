use crate::core::constants::*;
use crate::core::notify::{LogCategory, Notice};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Runtime pacing knobs for an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Minimum gap between manual actions (player or monster).
    pub action_delay: Duration,
    /// Gap between auto-combat rounds.
    pub auto_combat_delay: Duration,
    pub log_capacity: usize,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            action_delay: Duration::from_millis(ACTION_DELAY_MS),
            auto_combat_delay: Duration::from_millis(AUTO_COMBAT_DELAY_MS),
            log_capacity: COMBAT_LOG_CAPACITY,
        }
    }
}

/// Everything that happened as the direct result of one combat step.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
    },
    SpecialAttack {
        ability: &'static str,
        qi_cost: u32,
        damage: u32,
    },
    Defended {
        qi_restored: u32,
    },
    TechniqueUsed {
        name: &'static str,
        damage: u32,
    },
    MonsterAttack {
        damage: u32,
    },
    /// The defend stance turned the hit away entirely.
    MonsterBlocked,
    /// A stunned monster lost its attack.
    MonsterStunned,
    /// A monster hit landed into a counter stance, which sent part of it back.
    CounterReflected {
        damage: u32,
        reflected: u32,
    },
}

/// State of the encounter in progress.
///
/// The two clocks are real time; `round` only counts auto-combat rounds.
#[derive(Debug, Clone)]
pub struct CombatState {
    pub active: bool,
    pub player_defending: bool,
    pub auto_combat: bool,
    pub round: u32,
    pub last_action_at: Option<Instant>,
    pub last_auto_action_at: Option<Instant>,
    /// Armed by a counter technique; consumed by the next monster hit.
    pub counter_ratio: Option<f64>,
    log: VecDeque<Notice>,
    log_capacity: usize,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(COMBAT_LOG_CAPACITY)
    }
}

impl CombatState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            active: false,
            player_defending: false,
            auto_combat: false,
            round: 0,
            last_action_at: None,
            last_auto_action_at: None,
            counter_ratio: None,
            log: VecDeque::with_capacity(log_capacity),
            log_capacity,
        }
    }

    pub fn add_log_entry(&mut self, message: String, category: LogCategory) {
        if self.log.len() >= self.log_capacity {
            self.log.pop_front();
        }
        self.log.push_back(Notice::new(message, category));
    }

    /// Most recent entries, oldest first.
    pub fn log(&self) -> &VecDeque<Notice> {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_pacing() {
        let config = CombatConfig::default();
        assert_eq!(config.action_delay, Duration::from_millis(700));
        assert_eq!(config.auto_combat_delay, Duration::from_millis(800));
        assert_eq!(config.log_capacity, 5);
    }

    #[test]
    fn test_log_keeps_last_five() {
        let mut state = CombatState::default();
        for i in 0..8 {
            state.add_log_entry(format!("第{}条", i), LogCategory::Combat);
        }
        assert_eq!(state.log().len(), 5);
        assert_eq!(state.log()[0].message, "第3条");
        assert_eq!(state.log()[4].message, "第7条");
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = CombatState::new(3);
        assert!(!state.active);
        assert!(!state.auto_combat);
        assert!(state.last_action_at.is_none());
        assert!(state.log().is_empty());
    }
}
