use super::stats::{Combatant, HasStatusEffects, StatBlock};
use serde::{Deserialize, Serialize};

/// Static spawn data for one kind of monster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
}

pub const GREY_WOLF: MonsterTemplate = MonsterTemplate {
    name: "灰狼",
    glyph: 'w',
    health: 30,
    attack: 10,
    defense: 3,
    experience: 20,
};
pub const BANDIT: MonsterTemplate = MonsterTemplate {
    name: "山贼",
    glyph: 'b',
    health: 50,
    attack: 12,
    defense: 5,
    experience: 25,
};
pub const WILD_BOAR: MonsterTemplate = MonsterTemplate {
    name: "野猪",
    glyph: 'p',
    health: 40,
    attack: 8,
    defense: 7,
    experience: 30,
};
pub const TIGER: MonsterTemplate = MonsterTemplate {
    name: "猛虎",
    glyph: 't',
    health: 70,
    attack: 15,
    defense: 8,
    experience: 40,
};
pub const MARTIAL_MASTER: MonsterTemplate = MonsterTemplate {
    name: "武林高手",
    glyph: 'm',
    health: 100,
    attack: 20,
    defense: 10,
    experience: 60,
};
pub const CAVE_BEAST: MonsterTemplate = MonsterTemplate {
    name: "洞窟妖兽",
    glyph: 'd',
    health: 80,
    attack: 18,
    defense: 12,
    experience: 50,
};
pub const CAVE_LORD: MonsterTemplate = MonsterTemplate {
    name: "洞窟之主",
    glyph: 'D',
    health: 200,
    attack: 25,
    defense: 15,
    experience: 100,
};

pub static ALL_MONSTERS: [MonsterTemplate; 7] = [
    GREY_WOLF,
    BANDIT,
    WILD_BOAR,
    TIGER,
    MARTIAL_MASTER,
    CAVE_BEAST,
    CAVE_LORD,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Roster id; identifies this individual for loot seeding and write-back.
    pub id: u32,
    pub name: String,
    pub glyph: char,
    pub stats: StatBlock,
    pub experience_reward: u32,
}

impl Monster {
    pub fn from_template(id: u32, template: &MonsterTemplate) -> Self {
        Self {
            id,
            name: template.name.to_string(),
            glyph: template.glyph,
            stats: StatBlock::new(template.health, 0, template.attack, template.defense, 0),
            experience_reward: template.experience,
        }
    }
}

impl Combatant for Monster {
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

impl HasStatusEffects for Monster {}
