// Combat pacing
pub const ACTION_DELAY_MS: u64 = 700;
pub const AUTO_COMBAT_DELAY_MS: u64 = 800;
pub const COMBAT_LOG_CAPACITY: usize = 5;
pub const MESSAGE_LOG_CAPACITY: usize = 8;

// Combat math
pub const MIN_DAMAGE: u32 = 1;
pub const MONSTER_DAMAGE_VARIANCE: f64 = 0.2;
pub const DEFEND_BLOCK_CHANCE: f64 = 0.5;
pub const DEFEND_MIN_QI_RESTORE: u32 = 5;
pub const DEFEND_QI_RESTORE_RATIO: f64 = 0.1;

// Auto-combat policy
pub const AUTO_LOW_QI_THRESHOLD: u32 = 10;
pub const AUTO_MONSTER_HEALTH_RATIO: f64 = 0.5;
pub const AUTO_PLAYER_HEALTH_RATIO: f64 = 0.5;
pub const AUTO_DEFEND_CHANCE: f64 = 0.3;
pub const AUTO_BASIC_ATTACK_CHANCE: f64 = 0.6;

// Cultivation ladder (lower rank = stronger)
pub const LOWEST_RANK: u8 = 9;
pub const HIGHEST_RANK: u8 = 0;
pub const NUM_REALMS: usize = 10;
pub const BASE_REALM_EXPERIENCE: u64 = 100;

// Heart method gates
pub const LOW_TIER_UNLOCK_RANK: u8 = 8;
pub const HIGH_TIER_UNLOCK_RANK: u8 = 6;
pub const ACQUIRED_UNLOCK_RANK: u8 = 5;

// Starting character (before rank 9 bonuses)
pub const PLAYER_BASE_HEALTH: u32 = 100;
pub const PLAYER_BASE_QI: u32 = 50;
pub const PLAYER_BASE_ATTACK: u32 = 10;
pub const PLAYER_BASE_DEFENSE: u32 = 5;
pub const PLAYER_BASE_SPEED: u32 = 5;
pub const REVIVE_HEALTH_DIVISOR: u32 = 2;

// Inventory
pub const INVENTORY_CAPACITY: usize = 20;

// Monster loot
pub const WEAPON_DROP_CHANCE: f64 = 0.20;
pub const ARMOR_DROP_CHANCE: f64 = 0.15;
pub const CONSUMABLE_DROP_CHANCE: f64 = 0.40;
pub const MONSTER_DROP_QUALITY_MODIFIER: f64 = -0.2;

// Rarity roll thresholds (roll + quality modifier)
pub const LEGENDARY_ROLL: f64 = 0.98;
pub const RARE_ROLL: f64 = 0.90;
pub const FINE_ROLL: f64 = 0.70;
