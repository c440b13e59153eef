//! The map-side collaborator: where monsters stand and what became of them.
//!
//! Map generation and rendering live outside the rules engine. The engine
//! only asks the world which monster occupies a tile and reports the
//! monster's state back once an encounter ends.

use crate::character::monster::{
    Monster, MonsterTemplate, BANDIT, CAVE_BEAST, CAVE_LORD, GREY_WOLF, MARTIAL_MASTER, TIGER,
    WILD_BOAR,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const AREA_WIDTH: i32 = 40;
pub const AREA_HEIGHT: i32 = 30;
/// Spawns keep this far from the area's edge.
const SPAWN_MARGIN: i32 = 5;
const SPAWN_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub trait World {
    /// A snapshot of the monster on this tile, if any.
    fn monster_at(&self, pos: Position) -> Option<Monster>;

    /// Writes an encounter's result back: defeated monsters leave the map,
    /// survivors keep their wounds.
    fn update_monster_state(&mut self, monster: &Monster);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Xiaoyao,
    Village,
    Forest,
    Mountain,
    Cave,
}

/// `count` monsters, each drawn uniformly from `pool`.
#[derive(Debug, Clone, Copy)]
pub struct SpawnRule {
    pub pool: &'static [MonsterTemplate],
    pub count: usize,
}

static FOREST_SPAWNS: [SpawnRule; 1] = [SpawnRule {
    pool: &[GREY_WOLF, BANDIT, WILD_BOAR],
    count: 5,
}];
static MOUNTAIN_SPAWNS: [SpawnRule; 2] = [
    SpawnRule {
        pool: &[TIGER],
        count: 8,
    },
    SpawnRule {
        pool: &[MARTIAL_MASTER],
        count: 3,
    },
];
static CAVE_SPAWNS: [SpawnRule; 1] = [SpawnRule {
    pool: &[CAVE_BEAST],
    count: 10,
}];

/// Where the cave's lord waits.
pub const CAVE_BOSS_POSITION: Position = Position::new(35, 25);

impl Area {
    pub fn id(&self) -> &'static str {
        match self {
            Area::Xiaoyao => "xiaoyao",
            Area::Village => "village",
            Area::Forest => "forest",
            Area::Mountain => "mountain",
            Area::Cave => "cave",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Area::Xiaoyao => "逍遥阁",
            Area::Village => "村庄",
            Area::Forest => "森林",
            Area::Mountain => "太华山",
            Area::Cave => "秘境洞窟",
        }
    }

    pub fn spawn_rules(&self) -> &'static [SpawnRule] {
        match self {
            Area::Forest => &FOREST_SPAWNS,
            Area::Mountain => &MOUNTAIN_SPAWNS,
            Area::Cave => &CAVE_SPAWNS,
            Area::Xiaoyao | Area::Village => &[],
        }
    }

    /// The deep chamber of the cave, bottom-right past (30, 20).
    pub fn is_boss_room(&self, pos: Position) -> bool {
        *self == Area::Cave && pos.x > 30 && pos.y > 20
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMonster {
    pub position: Position,
    pub monster: Monster,
}

/// In-memory monster placement for one area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterRoster {
    placed: Vec<PlacedMonster>,
    next_id: u32,
}

impl MonsterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A freshly populated area, as on entering it.
    pub fn spawn(area: Area, rng: &mut impl Rng) -> Self {
        let mut roster = Self::new();
        for rule in area.spawn_rules() {
            for _ in 0..rule.count {
                let template = &rule.pool[rng.gen_range(0..rule.pool.len())];
                let free = (0..SPAWN_ATTEMPTS)
                    .map(|_| {
                        Position::new(
                            rng.gen_range(SPAWN_MARGIN..=AREA_WIDTH - SPAWN_MARGIN),
                            rng.gen_range(SPAWN_MARGIN..=AREA_HEIGHT - SPAWN_MARGIN),
                        )
                    })
                    .find(|pos| !roster.is_occupied(*pos) && !area.is_boss_room(*pos));
                if let Some(pos) = free {
                    roster.place(pos, template);
                }
            }
        }
        if area == Area::Cave {
            roster.place(CAVE_BOSS_POSITION, &CAVE_LORD);
        }
        log::debug!("spawned {} monster(s) in {}", roster.len(), area.id());
        roster
    }

    /// Puts a new monster from `template` on `pos` and returns its id.
    pub fn place(&mut self, pos: Position, template: &MonsterTemplate) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.placed.push(PlacedMonster {
            position: pos,
            monster: Monster::from_template(id, template),
        });
        id
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.placed.iter().any(|p| p.position == pos)
    }

    pub fn monsters(&self) -> &[PlacedMonster] {
        &self.placed
    }

    pub fn position_of(&self, id: u32) -> Option<Position> {
        self.placed
            .iter()
            .find(|p| p.monster.id == id)
            .map(|p| p.position)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

impl World for MonsterRoster {
    fn monster_at(&self, pos: Position) -> Option<Monster> {
        self.placed
            .iter()
            .find(|p| p.position == pos)
            .map(|p| p.monster.clone())
    }

    fn update_monster_state(&mut self, monster: &Monster) {
        let Some(index) = self.placed.iter().position(|p| p.monster.id == monster.id) else {
            return;
        };
        if monster.stats.is_alive() {
            self.placed[index].monster.stats = monster.stats.clone();
        } else {
            self.placed.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_forest_spawns_five_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let roster = MonsterRoster::spawn(Area::Forest, &mut rng);
        assert_eq!(roster.len(), 5);
        for placed in roster.monsters() {
            assert!(["灰狼", "山贼", "野猪"].contains(&placed.monster.name.as_str()));
            assert!((5..=35).contains(&placed.position.x));
            assert!((5..=25).contains(&placed.position.y));
        }
    }

    #[test]
    fn test_mountain_and_cave_tables() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mountain = MonsterRoster::spawn(Area::Mountain, &mut rng);
        let count = |r: &MonsterRoster, name: &str| {
            r.monsters().iter().filter(|p| p.monster.name == name).count()
        };
        assert_eq!(count(&mountain, "猛虎"), 8);
        assert_eq!(count(&mountain, "武林高手"), 3);

        let cave = MonsterRoster::spawn(Area::Cave, &mut rng);
        assert_eq!(count(&cave, "洞窟妖兽"), 10);
        assert_eq!(cave.monster_at(CAVE_BOSS_POSITION).map(|m| m.name), Some("洞窟之主".into()));
        assert!(Area::Cave.is_boss_room(CAVE_BOSS_POSITION));
    }

    #[test]
    fn test_safe_areas_are_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(MonsterRoster::spawn(Area::Xiaoyao, &mut rng).is_empty());
        assert!(MonsterRoster::spawn(Area::Village, &mut rng).is_empty());
    }

    #[test]
    fn test_write_back_keeps_wounds_and_removes_dead() {
        let mut roster = MonsterRoster::new();
        let pos = Position::new(6, 6);
        roster.place(pos, &GREY_WOLF);

        let mut wolf = roster.monster_at(pos).unwrap();
        wolf.stats.health = 12;
        roster.update_monster_state(&wolf);
        assert_eq!(roster.monster_at(pos).unwrap().stats.health, 12);

        wolf.stats.health = 0;
        roster.update_monster_state(&wolf);
        assert!(roster.monster_at(pos).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut roster = MonsterRoster::new();
        let a = roster.place(Position::new(5, 5), &TIGER);
        let b = roster.place(Position::new(6, 5), &TIGER);
        assert_ne!(a, b);
        assert_eq!(roster.position_of(b), Some(Position::new(6, 5)));
    }
}
