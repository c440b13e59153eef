use crate::core::errors::Rejection;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Kill,
    Collect,
    Explore,
    Level,
    Talk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveState {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub kind: ObjectiveKind,
    /// Monster name, item name, area id, rank number or NPC id.
    pub target: String,
    pub description: String,
    pub quantity: u32,
    pub current: u32,
}

impl QuestObjective {
    pub fn new(
        description: &str,
        kind: ObjectiveKind,
        target: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            kind,
            target: target.into(),
            description: description.to_string(),
            quantity,
            current: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.quantity
    }

    pub fn state(&self) -> ObjectiveState {
        if self.is_complete() {
            ObjectiveState::Completed
        } else if self.current == 0 {
            ObjectiveState::NotStarted
        } else {
            ObjectiveState::InProgress
        }
    }

    pub fn matches(&self, kind: ObjectiveKind, target: &str) -> bool {
        self.kind == kind && self.target == target
    }

    /// Adds one step of progress, clamped at `quantity`. Returns whether
    /// the counter moved.
    pub fn increment(&mut self) -> bool {
        let before = self.current;
        self.current = self.current.saturating_add(1).min(self.quantity);
        self.current != before
    }

    pub fn progress_description(&self) -> String {
        format!("{} ({}/{})", self.description, self.current, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Map glyph of the NPC who gives and receives the quest.
    pub npc: String,
    pub objectives: Vec<QuestObjective>,
    pub experience_reward: u64,
    pub item_rewards: Vec<Item>,
    pub completed: bool,
}

impl Quest {
    pub fn new(id: u32, title: &str, description: &str, npc: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            npc: npc.to_string(),
            objectives: Vec::new(),
            experience_reward: 0,
            item_rewards: Vec::new(),
            completed: false,
        }
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_rewards(mut self, experience: u64, items: Vec<Item>) -> Self {
        self.experience_reward = experience;
        self.item_rewards = items;
        self
    }

    /// Recomputed from the objectives every time.
    pub fn all_objectives_complete(&self) -> bool {
        self.objectives.iter().all(QuestObjective::is_complete)
    }

    pub fn objective_status(&self) -> Vec<(String, bool)> {
        self.objectives
            .iter()
            .map(|o| (o.progress_description(), o.is_complete()))
            .collect()
    }
}

/// One objective line as shown in the quest panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectiveView {
    pub text: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestView {
    pub id: u32,
    pub title: String,
    pub npc: String,
    pub objectives: Vec<ObjectiveView>,
    pub ready_to_turn_in: bool,
}

impl From<&Quest> for QuestView {
    fn from(quest: &Quest) -> Self {
        Self {
            id: quest.id,
            title: quest.title.clone(),
            npc: quest.npc.clone(),
            objectives: quest
                .objective_status()
                .into_iter()
                .map(|(text, complete)| ObjectiveView { text, complete })
                .collect(),
            ready_to_turn_in: quest.all_objectives_complete(),
        }
    }
}

/// The player's quests. Every quest lives in exactly one pool and moves
/// between them; the catalog only ever hands out clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestLog {
    available: Vec<Quest>,
    active: Vec<Quest>,
    completed: Vec<Quest>,
}

impl QuestLog {
    pub fn available(&self) -> &[Quest] {
        &self.available
    }

    pub fn active(&self) -> &[Quest] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [Quest] {
        &mut self.active
    }

    pub fn completed(&self) -> &[Quest] {
        &self.completed
    }

    pub fn knows(&self, id: u32) -> bool {
        self.available
            .iter()
            .chain(&self.active)
            .chain(&self.completed)
            .any(|q| q.id == id)
    }

    pub fn is_active(&self, id: u32) -> bool {
        self.active.iter().any(|q| q.id == id)
    }

    pub fn is_completed(&self, id: u32) -> bool {
        self.completed.iter().any(|q| q.id == id)
    }

    /// Clones a catalog template into the available pool. Returns false if
    /// this quest id is already in any pool.
    pub fn offer(&mut self, template: &Quest) -> bool {
        if self.knows(template.id) {
            return false;
        }
        let mut quest = template.clone();
        quest.completed = false;
        for objective in &mut quest.objectives {
            objective.current = 0;
        }
        self.available.push(quest);
        true
    }

    pub fn accept(&mut self, id: u32) -> Result<&Quest, Rejection> {
        let pos = self
            .available
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| Rejection::UnknownId {
                kind: "quest",
                id: id.to_string(),
            })?;
        let quest = self.available.remove(pos);
        log::debug!("accepted quest {} ({})", quest.id, quest.title);
        self.active.push(quest);
        Ok(&self.active[self.active.len() - 1])
    }

    /// Moves an active quest to the completed pool.
    pub(crate) fn finish(&mut self, id: u32) -> Option<&Quest> {
        let pos = self.active.iter().position(|q| q.id == id)?;
        let mut quest = self.active.remove(pos);
        quest.completed = true;
        self.completed.push(quest);
        self.completed.last()
    }

    /// Quests this NPC can still hand out.
    pub fn quests_for_npc(&self, npc: &str) -> Vec<&Quest> {
        self.available.iter().filter(|q| q.npc == npc).collect()
    }

    pub fn active_progress(&self) -> Vec<QuestView> {
        self.active.iter().map(QuestView::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf_hunt() -> Quest {
        Quest::new(1, "村子的危机", "清理狼群。", "长")
            .with_objective(QuestObjective::new("击杀灰狼", ObjectiveKind::Kill, "灰狼", 3))
            .with_rewards(100, Vec::new())
    }

    #[test]
    fn test_objective_clamps_and_tracks_state() {
        let mut obj = QuestObjective::new("击杀灰狼", ObjectiveKind::Kill, "灰狼", 2);
        assert_eq!(obj.state(), ObjectiveState::NotStarted);
        assert!(obj.increment());
        assert_eq!(obj.state(), ObjectiveState::InProgress);
        assert!(obj.increment());
        assert_eq!(obj.state(), ObjectiveState::Completed);
        assert!(!obj.increment());
        assert!(!obj.increment());
        assert_eq!(obj.current, 2);
        assert_eq!(obj.progress_description(), "击杀灰狼 (2/2)");
    }

    #[test]
    fn test_objective_matching_is_exact() {
        let obj = QuestObjective::new("突破", ObjectiveKind::Level, "8", 1);
        assert!(obj.matches(ObjectiveKind::Level, "8"));
        assert!(!obj.matches(ObjectiveKind::Level, "08"));
        assert!(!obj.matches(ObjectiveKind::Kill, "8"));
    }

    #[test]
    fn test_offer_clones_template() {
        let template = wolf_hunt();
        let mut log = QuestLog::default();
        assert!(log.offer(&template));
        assert!(!log.offer(&template));

        log.accept(1).unwrap();
        log.active_mut()[0].objectives[0].increment();
        assert_eq!(template.objectives[0].current, 0);
        assert_eq!(log.active()[0].objectives[0].current, 1);
    }

    #[test]
    fn test_accept_moves_between_pools() {
        let mut log = QuestLog::default();
        log.offer(&wolf_hunt());
        assert_eq!(log.quests_for_npc("长").len(), 1);
        assert_eq!(log.quests_for_npc("铁").len(), 0);

        log.accept(1).unwrap();
        assert!(log.available().is_empty());
        assert!(log.is_active(1));
        assert!(log.quests_for_npc("长").is_empty());
        assert!(matches!(log.accept(1), Err(Rejection::UnknownId { .. })));
    }

    #[test]
    fn test_finish_marks_completed() {
        let mut log = QuestLog::default();
        log.offer(&wolf_hunt());
        log.accept(1).unwrap();
        assert!(log.finish(1).is_some_and(|q| q.completed));
        assert!(log.is_completed(1));
        assert!(!log.is_active(1));
        assert!(log.finish(1).is_none());
    }

    #[test]
    fn test_active_progress_view() {
        let mut log = QuestLog::default();
        log.offer(&wolf_hunt());
        log.accept(1).unwrap();
        let views = log.active_progress();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].objectives[0].text, "击杀灰狼 (0/3)");
        assert!(!views[0].ready_to_turn_in);
    }
}
