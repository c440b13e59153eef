use super::stats::{Combatant, HasStatusEffects, StatBlock, StatBonus, StatKind};
use crate::combat::abilities::{starting_abilities, Ability};
use crate::core::constants::*;
use crate::core::errors::Rejection;
use crate::cultivation::logic::enter_realm;
use crate::cultivation::realms::{experience_required, realm_name};
use crate::items::equipment::Equipment;
use crate::items::inventory::{equip_from_inventory, use_item, Inventory};
use crate::items::types::{EquipmentSlot, Item, Rarity};
use crate::martial::heart_method::InbornProgress;
use crate::martial::technique::{LearnedTechnique, BASIC_TECHNIQUE_ID};
use crate::quests::types::QuestLog;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub name: String,
    pub stats: StatBlock,
    /// Realm rank, 9 (lowest) down to 0 (highest). Never increases.
    pub rank: u8,
    pub experience: u64,
    /// Ordered weakest to strongest.
    pub abilities: Vec<Ability>,
    pub inborn: Option<InbornProgress>,
    pub acquired_methods: Vec<&'static str>,
    pub core_abilities: Vec<&'static str>,
    pub techniques: Vec<LearnedTechnique>,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub quests: QuestLog,
}

fn starting_weapon() -> Item {
    Item::equipment(
        "木剑",
        "一把普通的木剑，适合初学者练习。",
        EquipmentSlot::Weapon,
        vec![StatBonus::new(StatKind::Attack, 5.0)],
        LOWEST_RANK,
        Rarity::Common,
        10,
    )
}

fn starting_armor() -> Item {
    Item::equipment(
        "布衣",
        "一件普通的布衣，聊胜于无。",
        EquipmentSlot::Armor,
        vec![StatBonus::new(StatKind::Defense, 3.0)],
        LOWEST_RANK,
        Rarity::Common,
        8,
    )
}

impl Player {
    /// A fresh character standing in the first realm with basic gear.
    pub fn new(name: impl Into<String>) -> Self {
        let mut player = Self {
            name: name.into(),
            stats: StatBlock::new(
                PLAYER_BASE_HEALTH,
                PLAYER_BASE_QI,
                PLAYER_BASE_ATTACK,
                PLAYER_BASE_DEFENSE,
                PLAYER_BASE_SPEED,
            ),
            rank: LOWEST_RANK,
            experience: 0,
            abilities: starting_abilities(),
            inborn: None,
            acquired_methods: Vec::new(),
            core_abilities: Vec::new(),
            techniques: vec![LearnedTechnique::new(BASIC_TECHNIQUE_ID)],
            inventory: Inventory::default(),
            equipment: Equipment::default(),
            quests: QuestLog::default(),
        };

        enter_realm(&mut player, LOWEST_RANK);
        player.stats.health = player.stats.max_health;
        player.stats.qi = player.stats.max_qi;

        player.equipment.equip(&mut player.stats, starting_weapon());
        player.equipment.equip(&mut player.stats, starting_armor());
        player
    }

    pub fn realm_name(&self) -> &'static str {
        realm_name(self.rank)
    }

    /// Experience needed to leave the current realm; `None` at the summit.
    pub fn experience_to_next(&self) -> Option<u64> {
        (self.rank > HIGHEST_RANK).then(|| experience_required(self.rank))
    }

    pub fn inborn_method_name(&self) -> Option<&'static str> {
        self.inborn.as_ref().map(|p| p.method)
    }

    /// True if the inborn method or any acquired method has this name.
    pub fn knows_heart_method(&self, name: &str) -> bool {
        self.inborn_method_name() == Some(name) || self.acquired_methods.iter().any(|m| *m == name)
    }

    pub fn knows_technique(&self, id: &str) -> bool {
        self.techniques.iter().any(|t| t.id == id)
    }

    pub fn add_item(&mut self, item: Item) -> Result<String, Rejection> {
        self.inventory.add(item)
    }

    pub fn use_item(&mut self, index: usize) -> Result<String, Rejection> {
        use_item(
            &mut self.inventory,
            &mut self.equipment,
            &mut self.stats,
            self.rank,
            index,
        )
    }

    pub fn equip(&mut self, index: usize) -> Result<String, Rejection> {
        equip_from_inventory(
            &mut self.inventory,
            &mut self.equipment,
            &mut self.stats,
            self.rank,
            index,
        )
    }

    /// Brings a fallen player back at half health with status cleared.
    pub fn revive(&mut self) {
        self.stats.health = (self.stats.max_health / REVIVE_HEALTH_DIVISOR).max(1);
        self.stats.status = Default::default();
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }
}

impl HasStatusEffects for Player {}
