use super::generation::{generate_armor, generate_consumable, generate_material, generate_weapon};
use super::types::Item;
use crate::core::constants::{
    ARMOR_DROP_CHANCE, CONSUMABLE_DROP_CHANCE, MONSTER_DROP_QUALITY_MODIFIER, WEAPON_DROP_CHANCE,
};
use rand::Rng;

/// Rolls the loot bundle for a defeated monster.
///
/// Always one material (stack 1-2). Then at most one of weapon or armor,
/// and independently a consumable.
pub fn generate_monster_drop(monster_name: &str, rank: u8, rng: &mut impl Rng) -> Vec<Item> {
    let mut drops = Vec::new();
    let equipment_roll = rng.gen::<f64>();

    let material = generate_material(Some(monster_name), rng).with_stack(rng.gen_range(1..=2));
    drops.push(material);

    if equipment_roll < WEAPON_DROP_CHANCE {
        drops.push(generate_weapon(rank, MONSTER_DROP_QUALITY_MODIFIER, rng));
    } else if equipment_roll < WEAPON_DROP_CHANCE + ARMOR_DROP_CHANCE {
        drops.push(generate_armor(rank, MONSTER_DROP_QUALITY_MODIFIER, rng));
    }

    if rng.gen::<f64>() < CONSUMABLE_DROP_CHANCE {
        drops.push(generate_consumable(rank, rng));
    }

    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::ItemKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_drop_always_contains_material() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let drops = generate_monster_drop("灰狼", 9, &mut rng);
            assert!(!drops.is_empty());
            assert_eq!(drops[0].name, "狼皮");
            assert!((1..=2).contains(&drops[0].stack_count()));
            assert!(drops.len() <= 3);
        }
    }

    #[test]
    fn test_at_most_one_equipment_piece() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let drops = generate_monster_drop("猛虎", 7, &mut rng);
            let equipment = drops
                .iter()
                .filter(|i| matches!(i.kind, ItemKind::Equipment { .. }))
                .count();
            assert!(equipment <= 1);
        }
    }

    #[test]
    fn test_equipment_drop_rate_roughly_35_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 4000;
        let hits = (0..trials)
            .filter(|_| {
                generate_monster_drop("山贼", 8, &mut rng)
                    .iter()
                    .any(Item::is_equipment)
            })
            .count();
        let rate = hits as f64 / trials as f64;
        assert!((0.30..0.40).contains(&rate), "rate was {rate}");
    }

    #[test]
    fn test_generic_materials_vary_between_kills() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let names: std::collections::HashSet<String> = (0..100)
            .map(|_| generate_monster_drop("野猪", 9, &mut rng)[0].name.clone())
            .collect();
        assert!(names.contains("草药"));
        assert!(names.len() > 1);
    }

    #[test]
    fn test_quest_materials_drop_from_their_monsters() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(generate_monster_drop("洞窟妖兽", 5, &mut rng)[0].name, "内丹");
        assert_eq!(generate_monster_drop("武林高手", 6, &mut rng)[0].name, "残页");
    }
}
