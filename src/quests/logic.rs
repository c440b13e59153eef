use super::types::{ObjectiveKind, Quest, QuestLog};
use crate::character::player::Player;
use crate::core::errors::Rejection;
use crate::core::notify::{LogCategory, Notice};
use crate::cultivation::logic::{gain_experience, Breakthrough};
use crate::items::types::{Item, Rarity};

/// Rarity prefix used in reward text; common items carry none.
fn reward_label(item: &Item) -> String {
    if item.rarity == Rarity::Common {
        item.name.clone()
    } else {
        item.display_name()
    }
}

/// "完成后可获得奖励: ..." shown when a quest becomes ready to turn in.
pub fn reward_preview(quest: &Quest) -> Option<String> {
    let mut parts = Vec::new();
    if quest.experience_reward > 0 {
        parts.push(format!("经验值: {}", quest.experience_reward));
    }
    if !quest.item_rewards.is_empty() {
        let names: Vec<String> = quest.item_rewards.iter().map(reward_label).collect();
        parts.push(format!("物品: {}", names.join(", ")));
    }
    (!parts.is_empty()).then(|| format!("完成后可获得奖励: {}", parts.join("; ")))
}

fn completion_notices(quest: &Quest) -> Vec<Notice> {
    let mut notices = vec![Notice::new(
        format!(
            "任务「{}」的所有目标已完成，请向{}报告。",
            quest.title, quest.npc
        ),
        LogCategory::Quest,
    )];
    if let Some(preview) = reward_preview(quest) {
        notices.push(Notice::new(preview, LogCategory::Quest));
    }
    notices
}

/// Advances every matching objective across all active quests by one.
fn update_objectives(quests: &mut QuestLog, kind: ObjectiveKind, target: &str) -> Vec<Notice> {
    let mut notices = Vec::new();
    for quest in quests.active_mut() {
        let was_complete = quest.all_objectives_complete();
        let mut touched = false;
        for objective in quest.objectives.iter_mut().filter(|o| o.matches(kind, target)) {
            touched = true;
            if objective.increment() {
                notices.push(Notice::new(
                    format!("任务进度：{}", objective.progress_description()),
                    LogCategory::Quest,
                ));
            }
        }
        if touched && !was_complete && quest.all_objectives_complete() {
            log::debug!("quest {} ready to turn in", quest.id);
            notices.extend(completion_notices(quest));
        }
    }
    notices
}

pub fn update_kill_objectives(quests: &mut QuestLog, monster_name: &str) -> Vec<Notice> {
    update_objectives(quests, ObjectiveKind::Kill, monster_name)
}

pub fn update_collect_objectives(quests: &mut QuestLog, item_name: &str) -> Vec<Notice> {
    update_objectives(quests, ObjectiveKind::Collect, item_name)
}

pub fn update_explore_objectives(quests: &mut QuestLog, area_id: &str) -> Vec<Notice> {
    update_objectives(quests, ObjectiveKind::Explore, area_id)
}

pub fn update_level_objectives(quests: &mut QuestLog, new_rank: u8) -> Vec<Notice> {
    update_objectives(quests, ObjectiveKind::Level, &new_rank.to_string())
}

pub fn update_talk_objectives(quests: &mut QuestLog, npc: &str) -> Vec<Notice> {
    update_objectives(quests, ObjectiveKind::Talk, npc)
}

/// What turning in a quest produced.
#[derive(Debug, Clone)]
pub struct QuestCompletion {
    pub quest_id: u32,
    pub summary: String,
    pub breakthroughs: Vec<Breakthrough>,
    /// Per-item inventory results; a full bag rejects individual rewards.
    pub item_results: Vec<Result<String, Rejection>>,
}

/// Turns in an active quest whose objectives are all complete.
pub fn complete_quest(player: &mut Player, quest_id: u32) -> Result<QuestCompletion, Rejection> {
    let quest = player
        .quests
        .active()
        .iter()
        .find(|q| q.id == quest_id)
        .ok_or(Rejection::QuestNotActive)?;
    if !quest.all_objectives_complete() {
        return Err(Rejection::QuestIncomplete {
            title: quest.title.clone(),
        });
    }

    let quest = player
        .quests
        .finish(quest_id)
        .cloned()
        .ok_or(Rejection::QuestNotActive)?;

    let mut rewards = Vec::new();
    let mut breakthroughs = Vec::new();
    if quest.experience_reward > 0 {
        breakthroughs = gain_experience(player, quest.experience_reward);
        rewards.push(format!("经验值: {}", quest.experience_reward));
    }

    let mut item_results = Vec::with_capacity(quest.item_rewards.len());
    let mut item_texts = Vec::new();
    for item in &quest.item_rewards {
        let mut text = reward_label(item);
        if let Some((attack, defense)) = item.combat_bonuses() {
            text.push_str(&format!(" (攻击: {}, 防御: {})", attack, defense));
        }
        item_texts.push(text);
        item_results.push(player.add_item(item.clone()));
    }
    if !item_texts.is_empty() {
        rewards.push(format!("物品: {}", item_texts.join(", ")));
    }

    log::info!("{} completed quest {} ({})", player.name, quest.id, quest.title);
    Ok(QuestCompletion {
        quest_id,
        summary: format!("完成任务「{}」，获得: {}", quest.title, rewards.join("; ")),
        breakthroughs,
        item_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::data::quest_catalog;
    use crate::quests::types::QuestObjective;

    fn player_with(ids: &[u32]) -> Player {
        let mut player = Player::new("少侠");
        let catalog = quest_catalog();
        for id in ids {
            let template = catalog.iter().find(|q| q.id == *id).unwrap();
            player.quests.offer(template);
            player.quests.accept(*id).unwrap();
        }
        player
    }

    #[test]
    fn test_kill_progress_and_completion_notice() {
        let mut player = player_with(&[1]);
        let first = update_kill_objectives(&mut player.quests, "灰狼");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message, "任务进度：击杀灰狼 (1/3)");

        update_kill_objectives(&mut player.quests, "灰狼");
        let last = update_kill_objectives(&mut player.quests, "灰狼");
        assert_eq!(last[1].message, "任务「村子的危机」的所有目标已完成，请向长报告。");
        assert_eq!(last[2].message, "完成后可获得奖励: 经验值: 100; 物品: 【优秀】狼牙剑");

        // further kills neither move progress nor re-announce
        assert!(update_kill_objectives(&mut player.quests, "灰狼").is_empty());
        assert_eq!(player.quests.active()[0].objectives[0].current, 3);
    }

    #[test]
    fn test_one_event_serves_several_quests() {
        let template_a = Quest::new(90, "甲", "", "长")
            .with_objective(QuestObjective::new("狼", ObjectiveKind::Kill, "灰狼", 1));
        let template_b = Quest::new(91, "乙", "", "铁")
            .with_objective(QuestObjective::new("狼", ObjectiveKind::Kill, "灰狼", 2));
        let mut log = QuestLog::default();
        for t in [&template_a, &template_b] {
            log.offer(t);
            log.accept(t.id).unwrap();
        }
        update_kill_objectives(&mut log, "灰狼");
        assert!(log.active()[0].all_objectives_complete());
        assert_eq!(log.active()[1].objectives[0].current, 1);
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut player = player_with(&[1, 5]);
        assert!(update_kill_objectives(&mut player.quests, "野猪").is_empty());
        assert!(update_level_objectives(&mut player.quests, 7).is_empty());
        let notices = update_level_objectives(&mut player.quests, 8);
        assert!(notices.iter().any(|n| n.message.contains("修炼之路")));
    }

    #[test]
    fn test_complete_quest_rejects_incomplete() {
        let mut player = player_with(&[1]);
        update_kill_objectives(&mut player.quests, "灰狼");
        let before = player.experience;
        assert_eq!(
            complete_quest(&mut player, 1).unwrap_err(),
            Rejection::QuestIncomplete {
                title: "村子的危机".into()
            }
        );
        assert!(player.quests.is_active(1));
        assert_eq!(player.experience, before);
    }

    #[test]
    fn test_complete_quest_grants_rewards_once() {
        let mut player = player_with(&[1]);
        for _ in 0..3 {
            update_kill_objectives(&mut player.quests, "灰狼");
        }
        let done = complete_quest(&mut player, 1).unwrap();
        assert_eq!(
            done.summary,
            "完成任务「村子的危机」，获得: 经验值: 100; 物品: 【优秀】狼牙剑 (攻击: 8, 防御: 0)"
        );
        // 100 experience is exactly the first threshold
        assert_eq!(done.breakthroughs.len(), 1);
        assert_eq!(player.rank, 8);
        assert_eq!(player.inventory.count_named("狼牙剑"), 1);
        assert!(player.quests.is_completed(1));

        assert_eq!(complete_quest(&mut player, 1).unwrap_err(), Rejection::QuestNotActive);
        assert_eq!(player.inventory.count_named("狼牙剑"), 1);
    }

    #[test]
    fn test_reward_items_are_independent_of_template() {
        let catalog = quest_catalog();
        let mut player = player_with(&[1]);
        for _ in 0..3 {
            update_kill_objectives(&mut player.quests, "灰狼");
        }
        complete_quest(&mut player, 1).unwrap();
        let index = player
            .inventory
            .items()
            .iter()
            .position(|i| i.name == "狼牙剑")
            .unwrap();
        player.inventory.take(index).unwrap();
        assert_eq!(catalog[0].item_rewards[0].name, "狼牙剑");
        assert_eq!(catalog[0].item_rewards.len(), 1);
    }
}
