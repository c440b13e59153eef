use super::types::{ConsumableEffect, EquipmentSlot, Item, Rarity};
use crate::character::stats::{StatBonus, StatKind};
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;

const WEAPON_TYPES: [&str; 5] = ["剑", "刀", "枪", "锤", "拳套"];
const WEAPON_MATERIALS: [&str; 6] = ["铁", "钢", "青铜", "精钢", "玄铁", "寒铁"];
const WEAPON_PREFIXES: [&str; 6] = ["锋利的", "沉重的", "坚固的", "平衡的", "破旧的", "精致的"];

const ARMOR_TYPES: [&str; 5] = ["袍", "甲", "衣", "护具", "披风"];
const ARMOR_MATERIALS: [&str; 6] = ["布", "皮革", "锁子", "铁", "精钢", "玄铁"];
const ARMOR_PREFIXES: [&str; 6] = ["结实的", "轻盈的", "坚固的", "灵活的", "破旧的", "精致的"];

/// Power tier of generated goods: 1 at the lowest rank, 10 at the highest.
pub fn item_tier(rank: u8) -> u32 {
    10 - rank.min(LOWEST_RANK) as u32
}

/// Rolls a rarity. `quality_modifier` shifts the roll (monster drops use a
/// negative modifier).
pub fn roll_rarity(quality_modifier: f64, rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>() + quality_modifier;
    if roll > LEGENDARY_ROLL {
        Rarity::Legendary
    } else if roll > RARE_ROLL {
        Rarity::Rare
    } else if roll > FINE_ROLL {
        Rarity::Fine
    } else {
        Rarity::Common
    }
}

fn pick<'a>(options: &[&'a str], rng: &mut impl Rng) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn equipment_value(primary: u32, per_point: u32, rarity: Rarity) -> u32 {
    (primary as f64 * per_point as f64 * (1.0 + rarity.index() as f64 * 0.5)) as u32
}

pub fn generate_weapon(rank: u8, quality_modifier: f64, rng: &mut impl Rng) -> Item {
    let rarity = roll_rarity(quality_modifier, rng);
    let weapon_type = pick(&WEAPON_TYPES, rng);
    let material = pick(&WEAPON_MATERIALS, rng);
    let prefix = pick(&WEAPON_PREFIXES, rng);

    let tier = item_tier(rank);
    let attack = ((3 + tier * 2) as f64 * rarity.stat_multiplier()) as u32;
    let mut bonuses = vec![StatBonus::new(StatKind::Attack, attack as f64)];
    if rarity >= Rarity::Rare {
        bonuses.push(StatBonus::new(StatKind::Speed, rng.gen_range(1..=3) as f64));
    }
    if rarity == Rarity::Legendary {
        bonuses.push(StatBonus::new(StatKind::MaxQi, rng.gen_range(5..=15) as f64));
    }

    Item::equipment(
        format!("{}{}{}", prefix, material, weapon_type),
        format!("一件{}级别的{}，由{}打造而成。", rarity.name(), weapon_type, material),
        EquipmentSlot::Weapon,
        bonuses,
        rank,
        rarity,
        equipment_value(attack, 10, rarity),
    )
}

pub fn generate_armor(rank: u8, quality_modifier: f64, rng: &mut impl Rng) -> Item {
    let rarity = roll_rarity(quality_modifier, rng);
    let armor_type = pick(&ARMOR_TYPES, rng);
    let material = pick(&ARMOR_MATERIALS, rng);
    let prefix = pick(&ARMOR_PREFIXES, rng);

    let tier = item_tier(rank);
    let defense = ((2.0 + tier as f64 * 1.5) * rarity.stat_multiplier()) as u32;
    let mut bonuses = vec![StatBonus::new(StatKind::Defense, defense as f64)];
    if rarity >= Rarity::Rare {
        bonuses.push(StatBonus::new(StatKind::MaxHealth, rng.gen_range(10..=30) as f64));
    }
    if rarity == Rarity::Legendary {
        bonuses.push(StatBonus::new(StatKind::MaxQi, rng.gen_range(5..=15) as f64));
    }

    Item::equipment(
        format!("{}{}{}", prefix, material, armor_type),
        format!("一件{}级别的{}，由{}制成。", rarity.name(), armor_type, material),
        EquipmentSlot::Armor,
        bonuses,
        rank,
        rarity,
        equipment_value(defense, 12, rarity),
    )
}

pub fn generate_consumable(rank: u8, rng: &mut impl Rng) -> Item {
    let tier = item_tier(rank);
    let (name, effects) = match rng.gen_range(0..4) {
        0 => ("回血丹", vec![ConsumableEffect::RestoreHealth(20 + tier * 10)]),
        1 => ("气回丹", vec![ConsumableEffect::RestoreQi(15 + tier * 8)]),
        2 => (
            "混元丹",
            vec![
                ConsumableEffect::RestoreHealth(10 + tier * 5),
                ConsumableEffect::RestoreQi(10 + tier * 5),
            ],
        ),
        _ => ("小还丹", vec![ConsumableEffect::RestoreHealth(30 + tier * 15)]),
    };

    let rarity = if tier >= 8 {
        Rarity::Rare
    } else if tier >= 4 {
        Rarity::Fine
    } else {
        Rarity::Common
    };

    let total: u32 = effects.iter().map(ConsumableEffect::magnitude).sum();
    let value = (total as f64 * (1.0 + rarity.index() as f64 * 0.3)) as u32;
    let described: Vec<String> = effects.iter().map(ConsumableEffect::describe).collect();
    let description = format!("{}级别的丹药，使用后可{}。", rarity.name(), described.join(", "));

    Item::consumable(name, description, effects, rarity, value).with_stack(rng.gen_range(1..=3))
}

struct MaterialTemplate {
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    value: u32,
}

/// Monster-specific materials keyed by a fragment of the monster's name.
const MONSTER_MATERIALS: [(&[&str], MaterialTemplate); 7] = [
    (
        &["狼"],
        MaterialTemplate {
            name: "狼皮",
            description: "一张完整的狼皮，可以用来制作护具。",
            rarity: Rarity::Common,
            value: 15,
        },
    ),
    (
        &["虎"],
        MaterialTemplate {
            name: "虎骨",
            description: "珍贵的虎骨，是制作丹药的重要材料。",
            rarity: Rarity::Fine,
            value: 50,
        },
    ),
    (
        &["蛇"],
        MaterialTemplate {
            name: "蛇胆",
            description: "蛇胆，含有剧毒，也是珍贵的药材。",
            rarity: Rarity::Common,
            value: 25,
        },
    ),
    (
        &["熊"],
        MaterialTemplate {
            name: "熊掌",
            description: "珍贵的熊掌，是名贵的食材。",
            rarity: Rarity::Fine,
            value: 60,
        },
    ),
    (
        &["妖兽"],
        MaterialTemplate {
            name: "内丹",
            description: "妖兽体内凝结的内丹，蕴含浓郁灵气，可入药。",
            rarity: Rarity::Rare,
            value: 120,
        },
    ),
    (
        &["高手"],
        MaterialTemplate {
            name: "残页",
            description: "一页残破的古籍，字迹依稀可辨。",
            rarity: Rarity::Fine,
            value: 40,
        },
    ),
    (
        &["山贼", "强盗"],
        MaterialTemplate {
            name: "布料",
            description: "一些粗糙的布料，可用于制作简单的衣物。",
            rarity: Rarity::Common,
            value: 10,
        },
    ),
];

const GENERIC_MATERIALS: [(MaterialTemplate, &str); 4] = [
    (
        MaterialTemplate {
            name: "草药",
            description: "常见的草药，可用于制作简单的药物。",
            rarity: Rarity::Common,
            value: 5,
        },
        "野外采集",
    ),
    (
        MaterialTemplate {
            name: "兽皮",
            description: "一块普通的兽皮，可以用来制作简单的护具。",
            rarity: Rarity::Common,
            value: 12,
        },
        "由野兽身上获得",
    ),
    (
        MaterialTemplate {
            name: "铁矿石",
            description: "一块含铁量较高的矿石，可以提炼出铁。",
            rarity: Rarity::Common,
            value: 20,
        },
        "矿洞中开采",
    ),
    (
        MaterialTemplate {
            name: "木材",
            description: "一段结实的木材，可用于制作武器或建筑。",
            rarity: Rarity::Common,
            value: 8,
        },
        "森林中获取",
    ),
];

/// Material looted from a monster. Known creature families drop their own
/// part; anything else yields a random common material stack of 1-5.
pub fn generate_material(monster_name: Option<&str>, rng: &mut impl Rng) -> Item {
    if let Some(monster) = monster_name {
        let known = MONSTER_MATERIALS
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| monster.contains(k)));
        if let Some((_, t)) = known {
            return Item::material(
                t.name,
                t.description,
                format!("由{}身上获得", monster),
                t.rarity,
                t.value,
            );
        }
    }

    let (t, source) = &GENERIC_MATERIALS[rng.gen_range(0..GENERIC_MATERIALS.len())];
    Item::material(t.name, t.description, *source, t.rarity, t.value)
        .with_stack(rng.gen_range(1..=5))
}
