use crate::core::constants::MIN_DAMAGE;
use serde::{Deserialize, Serialize};

/// Every attribute a bonus map may touch.
///
/// Core kinds are integer stats on the `StatBlock`. The remaining kinds are
/// passive traits granted by heart methods; they accumulate in `Traits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    MaxHealth,
    MaxQi,
    Attack,
    Defense,
    Speed,
    QiRecovery,
    HealthRegen,
    CritChance,
    DodgeChance,
    CounterChance,
    ReflectChance,
    ArmorPenetration,
    Resistance,
    ReflectRatio,
    DefenseToAttack,
    QiSteal,
    FreezeChance,
    ElementalDamage,
}

impl StatKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatKind::MaxHealth => "生命上限",
            StatKind::MaxQi => "内力上限",
            StatKind::Attack => "攻击",
            StatKind::Defense => "防御",
            StatKind::Speed => "速度",
            StatKind::QiRecovery => "内力恢复",
            StatKind::HealthRegen => "生命恢复",
            StatKind::CritChance => "暴击率",
            StatKind::DodgeChance => "闪避率",
            StatKind::CounterChance => "反击率",
            StatKind::ReflectChance => "反弹率",
            StatKind::ArmorPenetration => "破甲",
            StatKind::Resistance => "抗性",
            StatKind::ReflectRatio => "反弹比例",
            StatKind::DefenseToAttack => "以守化攻",
            StatKind::QiSteal => "吸取内力",
            StatKind::FreezeChance => "冰冻率",
            StatKind::ElementalDamage => "属性伤害",
        }
    }

    pub fn is_trait(&self) -> bool {
        !matches!(
            self,
            StatKind::MaxHealth
                | StatKind::MaxQi
                | StatKind::Attack
                | StatKind::Defense
                | StatKind::Speed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBonus {
    pub kind: StatKind,
    pub amount: f64,
}

impl StatBonus {
    pub const fn new(kind: StatKind, amount: f64) -> Self {
        Self { kind, amount }
    }

    pub fn describe(&self) -> String {
        if self.kind.is_trait() && self.amount.abs() < 1.0 {
            format!("{}+{:.0}%", self.kind.label(), self.amount * 100.0)
        } else {
            format!("{}+{}", self.kind.label(), self.amount.round() as i64)
        }
    }
}

/// Passive traits from heart methods and core abilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub qi_recovery: f64,
    pub health_regen: f64,
    pub crit_chance: f64,
    pub dodge_chance: f64,
    pub counter_chance: f64,
    pub reflect_chance: f64,
    pub armor_penetration: f64,
    pub resistance: f64,
    pub reflect_ratio: f64,
    pub defense_to_attack: f64,
    pub qi_steal: f64,
    pub freeze_chance: f64,
    pub elemental_damage: f64,
}

impl Traits {
    fn slot_mut(&mut self, kind: StatKind) -> Option<&mut f64> {
        match kind {
            StatKind::QiRecovery => Some(&mut self.qi_recovery),
            StatKind::HealthRegen => Some(&mut self.health_regen),
            StatKind::CritChance => Some(&mut self.crit_chance),
            StatKind::DodgeChance => Some(&mut self.dodge_chance),
            StatKind::CounterChance => Some(&mut self.counter_chance),
            StatKind::ReflectChance => Some(&mut self.reflect_chance),
            StatKind::ArmorPenetration => Some(&mut self.armor_penetration),
            StatKind::Resistance => Some(&mut self.resistance),
            StatKind::ReflectRatio => Some(&mut self.reflect_ratio),
            StatKind::DefenseToAttack => Some(&mut self.defense_to_attack),
            StatKind::QiSteal => Some(&mut self.qi_steal),
            StatKind::FreezeChance => Some(&mut self.freeze_chance),
            StatKind::ElementalDamage => Some(&mut self.elemental_damage),
            _ => None,
        }
    }

    fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::QiRecovery => self.qi_recovery,
            StatKind::HealthRegen => self.health_regen,
            StatKind::CritChance => self.crit_chance,
            StatKind::DodgeChance => self.dodge_chance,
            StatKind::CounterChance => self.counter_chance,
            StatKind::ReflectChance => self.reflect_chance,
            StatKind::ArmorPenetration => self.armor_penetration,
            StatKind::Resistance => self.resistance,
            StatKind::ReflectRatio => self.reflect_ratio,
            StatKind::DefenseToAttack => self.defense_to_attack,
            StatKind::QiSteal => self.qi_steal,
            StatKind::FreezeChance => self.freeze_chance,
            StatKind::ElementalDamage => self.elemental_damage,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub stunned: bool,
    /// Bleed damage still to be taken; also the number of turns remaining.
    pub bleed: u32,
    pub poison: u32,
}

/// What one turn of status effects did to an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub bleed_damage: u32,
    pub poison_damage: u32,
}

impl StatusTick {
    pub fn total(&self) -> u32 {
        self.bleed_damage + self.poison_damage
    }
}

/// Shared attribute record for players and monsters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub health: u32,
    pub max_health: u32,
    pub qi: u32,
    pub max_qi: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    #[serde(default)]
    pub status: StatusEffects,
    #[serde(default)]
    pub traits: Traits,
}

impl StatBlock {
    pub fn new(max_health: u32, max_qi: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            qi: max_qi,
            max_qi,
            attack,
            defense,
            speed,
            status: StatusEffects::default(),
            traits: Traits::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies an incoming hit through defense. Never deals less than 1.
    pub fn take_damage(&mut self, raw_damage: u32) -> u32 {
        let actual = mitigated_damage(raw_damage, self.defense);
        self.health = self.health.saturating_sub(actual);
        actual
    }

    /// Removes health directly, bypassing defense (bleed, poison, reflection).
    pub fn lose_health(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    pub fn restore_health(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    pub fn restore_qi(&mut self, amount: u32) -> u32 {
        let before = self.qi;
        self.qi = self.qi.saturating_add(amount).min(self.max_qi);
        self.qi - before
    }

    /// Spends qi if there is enough of it.
    pub fn spend_qi(&mut self, cost: u32) -> bool {
        if self.qi < cost {
            return false;
        }
        self.qi -= cost;
        true
    }

    pub fn drain_qi(&mut self, amount: u32) -> u32 {
        let drained = amount.min(self.qi);
        self.qi -= drained;
        drained
    }

    /// Current value of any stat kind, used for requirement checks.
    pub fn value(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::MaxHealth => self.max_health as f64,
            StatKind::MaxQi => self.max_qi as f64,
            StatKind::Attack => self.attack as f64,
            StatKind::Defense => self.defense as f64,
            StatKind::Speed => self.speed as f64,
            other => self.traits.get(other),
        }
    }

    /// Runs one turn of damage-over-time effects and expires a stun.
    pub fn tick_status_effects(&mut self) -> StatusTick {
        let mut tick = StatusTick::default();
        if self.status.bleed > 0 {
            tick.bleed_damage = self.lose_health(self.status.bleed);
            self.status.bleed -= 1;
        }
        if self.status.poison > 0 {
            tick.poison_damage = self.lose_health(self.status.poison);
            self.status.poison -= 1;
        }
        tick
    }

    fn clamp_pools(&mut self) {
        self.health = self.health.min(self.max_health);
        self.qi = self.qi.min(self.max_qi);
    }
}

/// `max(1, raw - defense)`
pub fn mitigated_damage(raw_damage: u32, defense: u32) -> u32 {
    raw_damage.saturating_sub(defense).max(MIN_DAMAGE)
}

fn offset(value: u32, delta: f64) -> u32 {
    let shifted = value as i64 + delta.round() as i64;
    shifted.clamp(0, u32::MAX as i64) as u32
}

/// Adds `amount` to a single stat. Raising a pool maximum leaves the current
/// pool untouched; lowering it clamps the current pool.
pub fn apply_bonus(stats: &mut StatBlock, kind: StatKind, amount: f64) {
    match kind {
        StatKind::MaxHealth => stats.max_health = offset(stats.max_health, amount),
        StatKind::MaxQi => stats.max_qi = offset(stats.max_qi, amount),
        StatKind::Attack => stats.attack = offset(stats.attack, amount),
        StatKind::Defense => stats.defense = offset(stats.defense, amount),
        StatKind::Speed => stats.speed = offset(stats.speed, amount),
        other => {
            if let Some(slot) = stats.traits.slot_mut(other) {
                *slot += amount;
            }
        }
    }
    stats.clamp_pools();
}

pub fn apply_bonuses(stats: &mut StatBlock, bonuses: &[StatBonus]) {
    for bonus in bonuses {
        apply_bonus(stats, bonus.kind, bonus.amount);
    }
}

pub fn remove_bonuses(stats: &mut StatBlock, bonuses: &[StatBonus]) {
    for bonus in bonuses {
        apply_bonus(stats, bonus.kind, -bonus.amount);
    }
}

pub fn describe_bonuses(bonuses: &[StatBonus]) -> String {
    bonuses
        .iter()
        .map(StatBonus::describe)
        .collect::<Vec<_>>()
        .join("，")
}

/// Anything that can stand on one side of an encounter.
pub trait Combatant {
    fn name(&self) -> &str;
    fn stats(&self) -> &StatBlock;
    fn stats_mut(&mut self) -> &mut StatBlock;

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }
}

/// Entities that carry stun/bleed/poison state between turns.
pub trait HasStatusEffects: Combatant {
    fn status(&self) -> &StatusEffects {
        &self.stats().status
    }

    fn end_of_turn(&mut self) -> StatusTick {
        self.stats_mut().tick_status_effects()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_never_below_one() {
        let mut stats = StatBlock::new(100, 0, 10, 5, 5);
        assert_eq!(stats.take_damage(3), 1);
        assert_eq!(stats.health, 99);
        assert_eq!(stats.take_damage(0), 1);
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let mut stats = StatBlock::new(100, 0, 10, 5, 5);
        assert_eq!(stats.take_damage(25), 20);
        assert_eq!(stats.health, 80);
    }

    #[test]
    fn test_health_never_underflows() {
        let mut stats = StatBlock::new(10, 0, 10, 0, 5);
        stats.take_damage(500);
        assert_eq!(stats.health, 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_restore_is_capped() {
        let mut stats = StatBlock::new(100, 50, 10, 5, 5);
        stats.health = 90;
        stats.qi = 45;
        assert_eq!(stats.restore_health(30), 10);
        assert_eq!(stats.restore_qi(30), 5);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.qi, 50);
    }

    #[test]
    fn test_spend_qi_requires_enough() {
        let mut stats = StatBlock::new(100, 50, 10, 5, 5);
        stats.qi = 8;
        assert!(!stats.spend_qi(10));
        assert_eq!(stats.qi, 8);
        assert!(stats.spend_qi(8));
        assert_eq!(stats.qi, 0);
    }

    #[test]
    fn test_apply_bonus_typed_kinds() {
        let mut stats = StatBlock::new(100, 50, 10, 5, 5);
        apply_bonus(&mut stats, StatKind::Attack, 15.0);
        apply_bonus(&mut stats, StatKind::MaxHealth, 100.0);
        apply_bonus(&mut stats, StatKind::CounterChance, 0.2);
        assert_eq!(stats.attack, 25);
        assert_eq!(stats.max_health, 200);
        assert_eq!(stats.health, 100, "raising the max leaves current health alone");
        assert!((stats.traits.counter_chance - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lowering_max_clamps_pool() {
        let mut stats = StatBlock::new(100, 50, 10, 5, 5);
        apply_bonus(&mut stats, StatKind::MaxQi, -30.0);
        assert_eq!(stats.max_qi, 20);
        assert_eq!(stats.qi, 20);
    }

    #[test]
    fn test_remove_bonuses_round_trips() {
        let mut stats = StatBlock::new(100, 50, 10, 5, 5);
        let original = stats.clone();
        let bonuses = [
            StatBonus::new(StatKind::Attack, 8.0),
            StatBonus::new(StatKind::Speed, 2.0),
        ];
        apply_bonuses(&mut stats, &bonuses);
        remove_bonuses(&mut stats, &bonuses);
        assert_eq!(stats, original);
    }

    #[test]
    fn test_bleed_ticks_down() {
        let mut stats = StatBlock::new(100, 0, 10, 5, 5);
        stats.status.bleed = 3;
        assert_eq!(stats.tick_status_effects().bleed_damage, 3);
        assert_eq!(stats.tick_status_effects().bleed_damage, 2);
        assert_eq!(stats.tick_status_effects().bleed_damage, 1);
        assert_eq!(stats.tick_status_effects().total(), 0);
        assert_eq!(stats.health, 94);
    }

    #[test]
    fn test_bonus_description() {
        assert_eq!(StatBonus::new(StatKind::Attack, 10.0).describe(), "攻击+10");
        assert_eq!(
            StatBonus::new(StatKind::DodgeChance, 0.15).describe(),
            "闪避率+15%"
        );
    }
}
