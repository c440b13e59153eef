//! The ten-rank realm ladder. Rank 9 is where every player starts and rank
//! 0 is the summit; a lower number is always stronger.

use crate::character::stats::{StatBonus, StatKind};
use crate::core::constants::{BASE_REALM_EXPERIENCE, HIGHEST_RANK, LOWEST_RANK};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Realm {
    pub rank: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Applied once, on entering the realm.
    pub bonuses: &'static [StatBonus],
}

const fn bonuses5(
    max_health: f64,
    max_qi: f64,
    attack: f64,
    defense: f64,
    speed: f64,
) -> [StatBonus; 5] {
    [
        StatBonus::new(StatKind::MaxHealth, max_health),
        StatBonus::new(StatKind::MaxQi, max_qi),
        StatBonus::new(StatKind::Attack, attack),
        StatBonus::new(StatKind::Defense, defense),
        StatBonus::new(StatKind::Speed, speed),
    ]
}

const RANK_9_BONUSES: [StatBonus; 4] = [
    StatBonus::new(StatKind::MaxHealth, 100.0),
    StatBonus::new(StatKind::Attack, 10.0),
    StatBonus::new(StatKind::Defense, 5.0),
    StatBonus::new(StatKind::Speed, 5.0),
];
const RANK_8_BONUSES: [StatBonus; 5] = bonuses5(150.0, 50.0, 15.0, 8.0, 6.0);
const RANK_7_BONUSES: [StatBonus; 5] = bonuses5(200.0, 100.0, 20.0, 12.0, 8.0);
const RANK_6_BONUSES: [StatBonus; 5] = bonuses5(300.0, 150.0, 30.0, 18.0, 10.0);
const RANK_5_BONUSES: [StatBonus; 5] = bonuses5(450.0, 200.0, 45.0, 25.0, 12.0);
const RANK_4_BONUSES: [StatBonus; 5] = bonuses5(600.0, 300.0, 60.0, 35.0, 15.0);
const RANK_3_BONUSES: [StatBonus; 5] = bonuses5(800.0, 450.0, 80.0, 50.0, 18.0);
const RANK_2_BONUSES: [StatBonus; 5] = bonuses5(1000.0, 600.0, 100.0, 70.0, 22.0);
const RANK_1_BONUSES: [StatBonus; 5] = bonuses5(1500.0, 800.0, 150.0, 100.0, 25.0);
const RANK_0_BONUSES: [StatBonus; 5] = bonuses5(2000.0, 1000.0, 200.0, 150.0, 30.0);

/// Indexed by rank.
pub static REALMS: [Realm; 10] = [
    Realm {
        rank: 0,
        name: "洞玄：窥道之境",
        description: "超越了对\"力\"的追求，达到了对世界本源\"道\"的深刻理解和部分感悟。",
        bonuses: &RANK_0_BONUSES,
    },
    Realm {
        rank: 1,
        name: "归真：返璞归元",
        description: "精气神三者高度凝练统一，对自身力量和天地规则的理解达到返璞归真的境界。",
        bonuses: &RANK_1_BONUSES,
    },
    Realm {
        rank: 2,
        name: "法域：意展成界",
        description: "以自身强大的意志与精纯的能量，向外辐射形成一个有限范围的\"领域\"或\"气场\"。",
        bonuses: &RANK_2_BONUSES,
    },
    Realm {
        rank: 3,
        name: "师法：法效天地",
        description: "心神与自然产生共鸣，开始理解并模仿天地间某些规律，将其融入武学理念与内力特性中。",
        bonuses: &RANK_3_BONUSES,
    },
    Realm {
        rank: 4,
        name: "显形：意到形随",
        description: "内力/罡气与精神意念深度结合，能够依据心意短暂凝聚成相对稳定的外部形态。",
        bonuses: &RANK_4_BONUSES,
    },
    Realm {
        rank: 5,
        name: "意动：心意相合",
        description: "精神力量开始觉醒，能够以\"意\"引导内力/罡气，使其运用更加精妙随心。",
        bonuses: &RANK_5_BONUSES,
    },
    Realm {
        rank: 6,
        name: "凝罡：内气化罡",
        description: "内力经过高度压缩与提纯，由无形气态向更凝练、坚韧的\"罡气\"形态转化。",
        bonuses: &RANK_6_BONUSES,
    },
    Realm {
        rank: 7,
        name: "通脉：气行周天",
        description: "打通体内主要的奇经八脉，内息运行畅通无阻，形成完整周天循环。",
        bonuses: &RANK_7_BONUSES,
    },
    Realm {
        rank: 8,
        name: "蕴气：内息初生",
        description: "成功在丹田凝聚第一缕内息，并掌握粗浅的搬运法门。",
        bonuses: &RANK_8_BONUSES,
    },
    Realm {
        rank: 9,
        name: "淬体：凡躯极限",
        description: "通过艰苦锻炼和特定方法打熬肉身，突破凡人极限。",
        bonuses: &RANK_9_BONUSES,
    },
];

pub fn realm(rank: u8) -> Option<&'static Realm> {
    REALMS.get(rank as usize)
}

pub fn realm_name(rank: u8) -> &'static str {
    realm(rank).map(|r| r.name).unwrap_or("未知境界")
}

/// Experience needed to break through out of `rank`: `100 * 2^(9 - rank)`.
pub fn experience_required(rank: u8) -> u64 {
    let steps = LOWEST_RANK.saturating_sub(rank.min(LOWEST_RANK)) as u32;
    BASE_REALM_EXPERIENCE << steps
}

/// Total experience to climb from the bottom of the ladder to the summit.
pub fn total_experience_to_summit() -> u64 {
    (HIGHEST_RANK + 1..=LOWEST_RANK)
        .map(experience_required)
        .sum()
}
