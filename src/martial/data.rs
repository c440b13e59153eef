//! Heart method and technique content tables.

use super::heart_method::{AcquiredHeartMethod, CoreAbility, InbornHeartMethod, QiAttribute};
use super::technique::{
    DamageFormula, EffectAmount, TechniqueDef, TechniqueEffect, TechniqueRequirements,
    BASIC_TECHNIQUE_ID,
};
use crate::character::stats::{StatBonus, StatKind};

pub static INBORN_METHODS: [InbornHeartMethod; 2] = [
    InbornHeartMethod {
        key: "taiji",
        name: "太极心法",
        description: "源自武当派的内家拳法根基，讲究以柔克刚，以静制动，阴阳相济。",
        attribute: QiAttribute::Neutral,
        bonuses: &[
            StatBonus::new(StatKind::MaxQi, 20.0),
            StatBonus::new(StatKind::Defense, 5.0),
            StatBonus::new(StatKind::QiRecovery, 2.0),
        ],
        low_tier: &[
            CoreAbility {
                name: "化劲",
                description: "能够将敌人的攻击力转化为己用，增加防御能力。",
                bonuses: &[
                    StatBonus::new(StatKind::Defense, 10.0),
                    StatBonus::new(StatKind::CounterChance, 0.2),
                ],
            },
            CoreAbility {
                name: "太极气旋",
                description: "形成气旋护体，提高闪避能力和移动速度。",
                bonuses: &[
                    StatBonus::new(StatKind::DodgeChance, 0.15),
                    StatBonus::new(StatKind::Speed, 3.0),
                ],
            },
            CoreAbility {
                name: "气沉丹田",
                description: "内力更加凝练，提高内力上限和恢复速度。",
                bonuses: &[
                    StatBonus::new(StatKind::MaxQi, 30.0),
                    StatBonus::new(StatKind::QiRecovery, 3.0),
                ],
            },
        ],
        high_tier: &[
            CoreAbility {
                name: "阴阳调和",
                description: "平衡阴阳之力，使所有属性得到全面提升。",
                bonuses: &[
                    StatBonus::new(StatKind::Attack, 10.0),
                    StatBonus::new(StatKind::Defense, 10.0),
                    StatBonus::new(StatKind::Speed, 5.0),
                    StatBonus::new(StatKind::MaxHealth, 50.0),
                    StatBonus::new(StatKind::MaxQi, 50.0),
                ],
            },
            CoreAbility {
                name: "四两拨千斤",
                description: "以巧劲卸力，极大提升防御能力，并有几率反弹伤害。",
                bonuses: &[
                    StatBonus::new(StatKind::Defense, 20.0),
                    StatBonus::new(StatKind::ReflectChance, 0.3),
                    StatBonus::new(StatKind::ReflectRatio, 0.5),
                ],
            },
            CoreAbility {
                name: "太极无极",
                description: "达到太极拳法的至高境界，攻防一体，使攻击力基于防御力获得额外加成。",
                bonuses: &[StatBonus::new(StatKind::DefenseToAttack, 0.5)],
            },
        ],
    },
    InbornHeartMethod {
        key: "shaolin",
        name: "少林心法",
        description: "少林寺独传内功，注重内外兼修，刚柔并济，以禅入武。",
        attribute: QiAttribute::Earth,
        bonuses: &[
            StatBonus::new(StatKind::MaxHealth, 30.0),
            StatBonus::new(StatKind::Attack, 8.0),
        ],
        low_tier: &[
            CoreAbility {
                name: "金钟罩",
                description: "修炼全身气血，大幅提高生命上限和防御力。",
                bonuses: &[
                    StatBonus::new(StatKind::MaxHealth, 80.0),
                    StatBonus::new(StatKind::Defense, 8.0),
                ],
            },
            CoreAbility {
                name: "易筋经",
                description: "改变筋骨结构，提高攻击力和暴击率。",
                bonuses: &[
                    StatBonus::new(StatKind::Attack, 15.0),
                    StatBonus::new(StatKind::CritChance, 0.1),
                ],
            },
            CoreAbility {
                name: "洗髓经",
                description: "净化全身精元，提高内力上限和各种抗性。",
                bonuses: &[
                    StatBonus::new(StatKind::MaxQi, 40.0),
                    StatBonus::new(StatKind::Resistance, 10.0),
                ],
            },
        ],
        high_tier: &[
            CoreAbility {
                name: "拈花指",
                description: "以禅入武的点穴绝技，增加攻击的穿透力和命中要害的几率。",
                bonuses: &[
                    StatBonus::new(StatKind::ArmorPenetration, 20.0),
                    StatBonus::new(StatKind::CritChance, 0.2),
                ],
            },
            CoreAbility {
                name: "大力金刚指",
                description: "刚猛无比的指力，极大提升攻击力和破防能力。",
                bonuses: &[
                    StatBonus::new(StatKind::Attack, 25.0),
                    StatBonus::new(StatKind::ArmorPenetration, 15.0),
                ],
            },
            CoreAbility {
                name: "达摩一苇",
                description: "传说中达摩祖师渡江的绝学，提高闪避能力和移动速度。",
                bonuses: &[
                    StatBonus::new(StatKind::DodgeChance, 0.2),
                    StatBonus::new(StatKind::Speed, 8.0),
                    StatBonus::new(StatKind::CounterChance, 0.15),
                ],
            },
        ],
    },
];

pub static ACQUIRED_METHODS: [AcquiredHeartMethod; 2] = [
    AcquiredHeartMethod {
        key: "jiuyang",
        name: "九阳神功",
        description: "明教至高无上的内功心法，阳刚至极，能化解百毒，增强体质。",
        attribute: QiAttribute::Fire,
        required_rank: 5,
        bonuses: &[
            StatBonus::new(StatKind::MaxHealth, 100.0),
            StatBonus::new(StatKind::QiRecovery, 5.0),
            StatBonus::new(StatKind::Resistance, 0.8),
        ],
        core_abilities: &[
            CoreAbility {
                name: "九阳护体",
                description: "运转九阳真气护体，获得持续的生命恢复效果。",
                bonuses: &[StatBonus::new(StatKind::HealthRegen, 5.0)],
            },
            CoreAbility {
                name: "阳炎爆",
                description: "引爆体内阳气，对周围敌人造成火属性伤害。",
                bonuses: &[StatBonus::new(StatKind::ElementalDamage, 0.3)],
            },
        ],
    },
    AcquiredHeartMethod {
        key: "beiming",
        name: "北冥神功",
        description: "逍遥派独门绝学，能吸收他人内力为己用，化为己身内力。",
        attribute: QiAttribute::Water,
        required_rank: 4,
        bonuses: &[
            StatBonus::new(StatKind::MaxQi, 120.0),
            StatBonus::new(StatKind::QiSteal, 0.2),
        ],
        core_abilities: &[
            CoreAbility {
                name: "吸星大法",
                description: "能够吸收敌人的内力恢复自身内力。",
                bonuses: &[StatBonus::new(StatKind::QiSteal, 5.0)],
            },
            CoreAbility {
                name: "寒冰真气",
                description: "运转寒冰真气，攻击附带冰冻效果。",
                bonuses: &[StatBonus::new(StatKind::FreezeChance, 0.15)],
            },
        ],
    },
];

const fn requires(max_rank: u8, heart_method: Option<&'static str>) -> TechniqueRequirements {
    TechniqueRequirements {
        max_rank: Some(max_rank),
        heart_method,
        stat_floors: &[],
    }
}

pub static TECHNIQUES: [TechniqueDef; 8] = [
    TechniqueDef {
        id: BASIC_TECHNIQUE_ID,
        name: "普通攻击",
        description: "最基本的攻击方式，不消耗内力。",
        base_damage: 5,
        qi_cost: 0,
        cooldown: 0,
        formula: DamageFormula::AttackOnly,
        requirements: TechniqueRequirements::NONE,
        effects: &[],
    },
    TechniqueDef {
        id: "taiji_palm",
        name: "太极掌",
        description: "以柔克刚的太极掌法，能够借力打力。",
        base_damage: 15,
        qi_cost: 10,
        cooldown: 2,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(8, Some("太极心法")),
        effects: &[TechniqueEffect::CounterDamage(0.5)],
    },
    TechniqueDef {
        id: "taiji_fist",
        name: "太极拳",
        description: "刚柔并济的太极拳法，讲究借力打力。",
        base_damage: 20,
        qi_cost: 15,
        cooldown: 3,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(7, Some("太极心法")),
        effects: &[TechniqueEffect::Stun { chance: 0.2 }],
    },
    TechniqueDef {
        id: "shaolin_fist",
        name: "少林伏虎拳",
        description: "刚猛有力的少林拳法，以刚克刚。",
        base_damage: 25,
        qi_cost: 20,
        cooldown: 2,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(7, Some("少林心法")),
        effects: &[TechniqueEffect::Stun { chance: 0.3 }],
    },
    TechniqueDef {
        id: "finger_jab",
        name: "一指禅",
        description: "少林点穴绝技，消耗对手内力。",
        base_damage: 15,
        qi_cost: 30,
        cooldown: 4,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(6, Some("少林心法")),
        effects: &[TechniqueEffect::QiDamage(30)],
    },
    TechniqueDef {
        id: "dragon_tiger",
        name: "龙虎八卦掌",
        description: "结合刚柔变化，威力强大的八卦掌法。",
        base_damage: 40,
        qi_cost: 40,
        cooldown: 5,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(5, None),
        effects: &[TechniqueEffect::Bleed {
            chance: 0.5,
            magnitude: 10,
        }],
    },
    TechniqueDef {
        id: "nine_sun",
        name: "九阳神掌",
        description: "明教绝学，阳刚至极的掌法。",
        base_damage: 50,
        qi_cost: 50,
        cooldown: 6,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(4, Some("九阳神功")),
        effects: &[TechniqueEffect::Heal(EffectAmount::Flat(20))],
    },
    TechniqueDef {
        id: "absorb_qi",
        name: "吸星大法",
        description: "逍遥派绝学，能吸收对方内力为己用。",
        base_damage: 30,
        qi_cost: 45,
        cooldown: 5,
        formula: DamageFormula::BasePlusAttack,
        requirements: requires(4, Some("北冥神功")),
        effects: &[
            TechniqueEffect::QiDamage(40),
            TechniqueEffect::QiRestore(EffectAmount::Flat(30)),
        ],
    },
];
