//! Immutable game content, built once and handed to the systems that need
//! lookups.

use crate::character::monster::{MonsterTemplate, ALL_MONSTERS};
use crate::cultivation::realms::{Realm, REALMS};
use crate::martial::data::{ACQUIRED_METHODS, INBORN_METHODS, TECHNIQUES};
use crate::martial::heart_method::{AcquiredHeartMethod, InbornHeartMethod};
use crate::martial::technique::TechniqueDef;
use crate::quests::data::quest_catalog;
use crate::quests::types::Quest;

#[derive(Debug, Clone)]
pub struct ContentCatalog {
    pub realms: &'static [Realm],
    pub inborn_methods: &'static [InbornHeartMethod],
    pub acquired_methods: &'static [AcquiredHeartMethod],
    pub techniques: &'static [TechniqueDef],
    pub monsters: &'static [MonsterTemplate],
    pub quests: Vec<Quest>,
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self {
            realms: &REALMS,
            inborn_methods: &INBORN_METHODS,
            acquired_methods: &ACQUIRED_METHODS,
            techniques: &TECHNIQUES,
            monsters: &ALL_MONSTERS,
            quests: quest_catalog(),
        }
    }

    /// Looks up by key (`"taiji"`) or display name (`"太极心法"`).
    pub fn inborn_method(&self, key: &str) -> Option<&'static InbornHeartMethod> {
        self.inborn_methods
            .iter()
            .find(|m| m.key == key || m.name == key)
    }

    pub fn acquired_method(&self, key: &str) -> Option<&'static AcquiredHeartMethod> {
        self.acquired_methods
            .iter()
            .find(|m| m.key == key || m.name == key)
    }

    pub fn technique(&self, id: &str) -> Option<&'static TechniqueDef> {
        self.techniques.iter().find(|t| t.id == id)
    }

    pub fn monster(&self, name: &str) -> Option<&'static MonsterTemplate> {
        self.monsters.iter().find(|m| m.name == name)
    }

    pub fn quest(&self, id: u32) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn quests_from(&self, npc: &str) -> impl Iterator<Item = &Quest> {
        let npc = npc.to_string();
        self.quests.iter().filter(move |q| q.npc == npc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_by_key_and_name() {
        let catalog = ContentCatalog::new();
        assert_eq!(catalog.inborn_method("taiji").map(|m| m.name), Some("太极心法"));
        assert_eq!(catalog.inborn_method("少林心法").map(|m| m.key), Some("shaolin"));
        assert_eq!(catalog.acquired_method("beiming").map(|m| m.required_rank), Some(4));
        assert!(catalog.acquired_method("unknown").is_none());
        assert_eq!(catalog.technique("nine_sun").map(|t| t.name), Some("九阳神掌"));
        assert_eq!(catalog.monster("洞窟之主").map(|m| m.health), Some(200));
    }

    #[test]
    fn test_catalog_holds_every_table() {
        let catalog = ContentCatalog::default();
        assert_eq!(catalog.realms.len(), 10);
        assert_eq!(catalog.quests.len(), 8);
        assert_eq!(catalog.quests_from("掌").count(), 1);
        assert_eq!(catalog.quest(4).map(|q| q.objectives.len()), Some(2));
    }
}
