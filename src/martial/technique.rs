use crate::character::player::Player;
use crate::character::stats::{StatBlock, StatKind};
use crate::core::errors::Rejection;
use rand::Rng;
use serde::Serialize;

pub const BASIC_TECHNIQUE_ID: &str = "basic";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EffectAmount {
    Flat(u32),
    PercentOfMax(f64),
}

impl EffectAmount {
    pub fn resolve(&self, max: u32) -> u32 {
        match *self {
            EffectAmount::Flat(n) => n,
            EffectAmount::PercentOfMax(ratio) => (max as f64 * ratio) as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TechniqueEffect {
    Stun { chance: f64 },
    Bleed { chance: f64, magnitude: u32 },
    QiDamage(u32),
    Heal(EffectAmount),
    QiRestore(EffectAmount),
    /// Arms a counter stance reflecting this share of the next hit taken.
    CounterDamage(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageFormula {
    /// `max(1, attack - defense/2)`; the base damage is ignored.
    AttackOnly,
    /// `max(1, base + attack - defense/2)`
    BasePlusAttack,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechniqueRequirements {
    /// The user's rank must be at or below this.
    pub max_rank: Option<u8>,
    /// Matches the inborn method or any acquired method by name.
    pub heart_method: Option<&'static str>,
    pub stat_floors: &'static [(StatKind, f64)],
}

impl TechniqueRequirements {
    pub const NONE: TechniqueRequirements = TechniqueRequirements {
        max_rank: None,
        heart_method: None,
        stat_floors: &[],
    };

    pub fn satisfied_by(&self, player: &Player) -> bool {
        if let Some(max_rank) = self.max_rank {
            if player.rank > max_rank {
                return false;
            }
        }
        if let Some(method) = self.heart_method {
            if !player.knows_heart_method(method) {
                return false;
            }
        }
        self.stat_floors
            .iter()
            .all(|(kind, floor)| player.stats.value(*kind) >= *floor)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TechniqueDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_damage: u32,
    pub qi_cost: u32,
    /// In resolved combat turns.
    pub cooldown: u32,
    pub formula: DamageFormula,
    pub requirements: TechniqueRequirements,
    pub effects: &'static [TechniqueEffect],
}

impl TechniqueDef {
    pub fn damage(&self, attack: u32, target_defense: u32) -> u32 {
        let raw = match self.formula {
            DamageFormula::AttackOnly => attack,
            DamageFormula::BasePlusAttack => self.base_damage + attack,
        };
        raw.saturating_sub(target_defense / 2).max(1)
    }
}

pub fn find_technique<'a>(defs: &'a [TechniqueDef], id: &str) -> Option<&'a TechniqueDef> {
    defs.iter().find(|d| d.id == id)
}

/// Per-player cooldown state for a known technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnedTechnique {
    pub id: &'static str,
    pub current_cooldown: u32,
}

impl LearnedTechnique {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            current_cooldown: 0,
        }
    }

    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

/// One resolved turn for every cooldown.
pub fn tick_cooldowns(techniques: &mut [LearnedTechnique]) {
    for technique in techniques {
        technique.tick();
    }
}

pub fn check_usable(
    def: &TechniqueDef,
    learned: &LearnedTechnique,
    player: &Player,
) -> Result<(), Rejection> {
    if learned.current_cooldown > 0 {
        return Err(Rejection::OnCooldown {
            name: def.name.to_string(),
            remaining: learned.current_cooldown,
        });
    }
    if player.stats.qi < def.qi_cost {
        return Err(Rejection::InsufficientQi {
            ability: def.name.to_string(),
            cost: def.qi_cost,
            available: player.stats.qi,
        });
    }
    if !def.requirements.satisfied_by(player) {
        return Err(Rejection::RequirementsUnmet {
            name: def.name.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechniqueOutcome {
    pub damage: u32,
    pub description: String,
    /// Set when the technique armed a counter stance.
    pub counter_ratio: Option<f64>,
}

/// Resolves an already-validated technique: pays qi, hits the target, starts
/// the cooldown, then applies secondary effects in order.
pub fn execute(
    def: &TechniqueDef,
    learned: &mut LearnedTechnique,
    user: &mut StatBlock,
    target: &mut StatBlock,
    rng: &mut impl Rng,
) -> TechniqueOutcome {
    user.qi = user.qi.saturating_sub(def.qi_cost);
    let damage = def.damage(user.attack, target.defense);
    target.lose_health(damage);
    learned.current_cooldown = def.cooldown;

    let mut parts = Vec::new();
    let mut counter_ratio = None;
    for effect in def.effects {
        match *effect {
            TechniqueEffect::Stun { chance } => {
                if rng.gen::<f64>() < chance {
                    target.status.stunned = true;
                    parts.push("目标被眩晕".to_string());
                }
            }
            TechniqueEffect::Bleed { chance, magnitude } => {
                if rng.gen::<f64>() < chance {
                    target.status.bleed += magnitude;
                    parts.push(format!("目标受到{}点流血伤害", magnitude));
                }
            }
            TechniqueEffect::QiDamage(amount) => {
                target.drain_qi(amount);
                parts.push(format!("目标损失{}点内力", amount));
            }
            TechniqueEffect::Heal(amount) => {
                let heal = amount.resolve(user.max_health);
                user.restore_health(heal);
                parts.push(format!("恢复{}点生命", heal));
            }
            TechniqueEffect::QiRestore(amount) => {
                let restore = amount.resolve(user.max_qi);
                user.restore_qi(restore);
                parts.push(format!("恢复{}点内力", restore));
            }
            TechniqueEffect::CounterDamage(ratio) => {
                counter_ratio = Some(ratio);
                parts.push(format!("摆出反击架势（反弹{:.0}%伤害）", ratio * 100.0));
            }
        }
    }

    TechniqueOutcome {
        damage,
        description: parts.join(", "),
        counter_ratio,
    }
}

/// Adds a technique to the player's repertoire. Usability is not checked.
pub fn learn_technique(player: &mut Player, def: &'static TechniqueDef) -> Result<String, Rejection> {
    if player.knows_technique(def.id) {
        return Err(Rejection::AlreadyLearned {
            name: def.name.to_string(),
        });
    }
    player.techniques.push(LearnedTechnique::new(def.id));
    Ok(format!("你学会了招式「{}」", def.name))
}

/// Row for the technique picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechniqueView {
    pub index: usize,
    pub name: &'static str,
    pub cooldown: u32,
    pub qi_cost: u32,
    pub usable: bool,
}

pub fn available_techniques(player: &Player, defs: &'static [TechniqueDef]) -> Vec<TechniqueView> {
    player
        .techniques
        .iter()
        .enumerate()
        .filter_map(|(index, learned)| {
            let def = find_technique(defs, learned.id)?;
            Some(TechniqueView {
                index,
                name: def.name,
                cooldown: learned.current_cooldown,
                qi_cost: def.qi_cost,
                usable: check_usable(def, learned, player).is_ok(),
            })
        })
        .collect()
}
