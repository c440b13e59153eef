//! Quest templates offered by the village and sect NPCs.

use super::types::{ObjectiveKind, Quest, QuestObjective};
use crate::character::stats::{StatBonus, StatKind};
use crate::items::types::{ConsumableEffect, EquipmentSlot, Item, Rarity};

/// Boss room tile group reached at the bottom of the cave.
pub const CAVE_BOSS_ROOM: &str = "cave_boss_room";

fn weapon(name: &str, desc: &str, bonuses: &[(StatKind, f64)], rank: u8, rarity: Rarity, value: u32) -> Item {
    gear(name, desc, EquipmentSlot::Weapon, bonuses, rank, rarity, value)
}

fn armor(name: &str, desc: &str, bonuses: &[(StatKind, f64)], rank: u8, rarity: Rarity, value: u32) -> Item {
    gear(name, desc, EquipmentSlot::Armor, bonuses, rank, rarity, value)
}

fn gear(
    name: &str,
    desc: &str,
    slot: EquipmentSlot,
    bonuses: &[(StatKind, f64)],
    rank: u8,
    rarity: Rarity,
    value: u32,
) -> Item {
    let bonuses = bonuses
        .iter()
        .map(|&(kind, amount)| StatBonus::new(kind, amount))
        .collect();
    Item::equipment(name, desc, slot, bonuses, rank, rarity, value)
}

/// Builds the quest templates. Players receive clones via `QuestLog::offer`.
pub fn quest_catalog() -> Vec<Quest> {
    use ObjectiveKind::*;
    use StatKind::*;

    vec![
        Quest::new(1, "村子的危机", "村庄周围的灰狼越来越多，威胁村民安全。请帮助清理周围的狼群。", "长")
            .with_objective(QuestObjective::new("击杀灰狼", Kill, "灰狼", 3))
            .with_rewards(
                100,
                vec![weapon(
                    "狼牙剑",
                    "用灰狼獠牙制成的锋利短剑，挥舞时带有一丝凌厉的气息。",
                    &[(Attack, 8.0)],
                    9,
                    Rarity::Fine,
                    120,
                )],
            ),
        Quest::new(2, "材料收集", "铁匠需要特殊材料来打造新的武器。", "铁")
            .with_objective(QuestObjective::new("收集虎骨", Collect, "虎骨", 2))
            .with_rewards(
                150,
                vec![
                    weapon(
                        "精钢锤",
                        "铁匠亲自打造的精钢锤，沉重而坚固，能够造成不俗的伤害。",
                        &[(Attack, 12.0), (Defense, 3.0)],
                        8,
                        Rarity::Fine,
                        180,
                    ),
                    Item::consumable(
                        "强效回复药",
                        "铁匠秘制的回复药剂，能够迅速恢复生命力。",
                        vec![ConsumableEffect::RestoreHealth(50)],
                        Rarity::Fine,
                        50,
                    ),
                ],
            ),
        Quest::new(3, "草药采集", "药商需要特殊草药来制作疗伤药。", "药")
            .with_objective(QuestObjective::new("收集草药", Collect, "草药", 5))
            .with_rewards(
                80,
                vec![
                    Item::consumable(
                        "灵气丹",
                        "药商使用珍贵药材炼制的丹药，服用后能够恢复大量内力。",
                        vec![ConsumableEffect::RestoreQi(60)],
                        Rarity::Rare,
                        100,
                    ),
                    armor(
                        "草药护甲",
                        "药商用特殊草药浸泡处理过的轻便护甲，具有一定的防御能力。",
                        &[(Defense, 10.0), (MaxHealth, 20.0)],
                        9,
                        Rarity::Fine,
                        150,
                    ),
                ],
            ),
        Quest::new(4, "武学考验", "掌门人想要测试你的武艺。", "掌")
            .with_objective(QuestObjective::new("击败山贼", Kill, "山贼", 5))
            .with_objective(QuestObjective::new("击败猛虎", Kill, "猛虎", 1))
            .with_rewards(
                200,
                vec![weapon(
                    "青玉剑",
                    "逍遥阁掌门人亲自锻造的佳作，剑身通体青玉，锋利无比。",
                    &[(Attack, 18.0), (Speed, 2.0)],
                    7,
                    Rarity::Rare,
                    300,
                )],
            ),
        Quest::new(5, "修炼之路", "要成为高手，需要不断修炼。", "师")
            .with_objective(QuestObjective::new("突破到蕴气境界", Level, "8", 1))
            .with_rewards(
                250,
                vec![
                    weapon(
                        "蕴气拳套",
                        "能够引导体内气息的特殊拳套，修炼有成者能发挥其真正威力。",
                        &[(Attack, 15.0), (MaxQi, 30.0)],
                        8,
                        Rarity::Rare,
                        250,
                    ),
                    Item::quest_item(
                        "《气之要诀》",
                        "记载了进阶蕴气技巧的秘籍，阅读后能更好地控制体内气息。",
                        5,
                        Rarity::Rare,
                    ),
                ],
            ),
        Quest::new(6, "古籍寻找", "藏经阁需要找回丢失的古籍。", "藏")
            .with_objective(QuestObjective::new("收集残页", Collect, "残页", 3))
            .with_rewards(
                120,
                vec![weapon(
                    "残页匕首",
                    "根据古籍记载的锻造手法制作的特殊匕首，轻巧锋利。",
                    &[(Attack, 14.0), (Speed, 3.0)],
                    8,
                    Rarity::Fine,
                    220,
                )],
            ),
        Quest::new(7, "医者仁心", "医师需要制作特效药来救治村民。", "医")
            .with_objective(QuestObjective::new("收集妖兽内丹", Collect, "内丹", 2))
            .with_rewards(
                180,
                vec![
                    Item::consumable(
                        "神奇灵药",
                        "医师倾尽所学制作的灵药，服用后能同时恢复生命和内力。",
                        vec![
                            ConsumableEffect::RestoreHealth(80),
                            ConsumableEffect::RestoreQi(60),
                        ],
                        Rarity::Rare,
                        200,
                    ),
                    armor(
                        "医者长袍",
                        "医师赠送的特制长袍，穿戴后能增强体质。",
                        &[(Defense, 8.0), (MaxHealth, 40.0)],
                        7,
                        Rarity::Rare,
                        200,
                    ),
                ],
            ),
        Quest::new(8, "洞窟之谜", "有传闻说洞窟深处有一个强大的妖魔。", "店")
            .with_objective(QuestObjective::new("击败洞窟之主", Kill, "洞窟之主", 1))
            .with_objective(QuestObjective::new("探索洞窟深处", Explore, CAVE_BOSS_ROOM, 1))
            .with_rewards(
                300,
                vec![
                    weapon(
                        "洞窟魔刃",
                        "从洞窟之主身上获得的神秘武器，蕴含着强大而诡异的力量。",
                        &[(Attack, 25.0), (MaxQi, 50.0)],
                        7,
                        Rarity::Legendary,
                        500,
                    ),
                    Item::consumable(
                        "洞窟精华",
                        "从洞窟深处获得的神秘物质，服用后能大幅提升内力上限。",
                        vec![ConsumableEffect::RaiseMaxQi(100)],
                        Rarity::Rare,
                        300,
                    ),
                ],
            ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique_and_ordered() {
        let catalog = quest_catalog();
        let ids: Vec<u32> = catalog.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_quest_has_npc_objectives_and_reward() {
        let npcs: HashSet<String> = quest_catalog().into_iter().map(|q| q.npc).collect();
        assert_eq!(npcs.len(), 8);
        for quest in quest_catalog() {
            assert!(!quest.objectives.is_empty(), "{}", quest.title);
            assert!(quest.experience_reward > 0);
            assert!(!quest.completed);
            assert!(!quest.all_objectives_complete());
        }
    }

    #[test]
    fn test_cave_quest_needs_boss_and_room() {
        let cave = quest_catalog().into_iter().find(|q| q.id == 8).unwrap();
        assert_eq!(cave.objectives[1].kind, ObjectiveKind::Explore);
        assert_eq!(cave.objectives[1].target, CAVE_BOSS_ROOM);
        assert_eq!(cave.item_rewards[0].rarity, Rarity::Legendary);
    }
}
