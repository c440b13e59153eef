use crate::character::stats::{StatBonus, StatKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Fine = 1,
    Rare = 2,
    Legendary = 3,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "普通",
            Rarity::Fine => "优秀",
            Rarity::Rare => "稀有",
            Rarity::Legendary => "传说",
        }
    }

    /// Stat multiplier for generated equipment.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Fine => 1.3,
            Rarity::Rare => 1.8,
            Rarity::Legendary => 2.5,
        }
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "武器",
            EquipmentSlot::Armor => "护甲",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    RestoreHealth(u32),
    RestoreQi(u32),
    RaiseMaxQi(u32),
}

impl ConsumableEffect {
    pub fn describe(&self) -> String {
        match self {
            ConsumableEffect::RestoreHealth(n) => format!("恢复{}点生命", n),
            ConsumableEffect::RestoreQi(n) => format!("恢复{}点内力", n),
            ConsumableEffect::RaiseMaxQi(n) => format!("提升{}点内力上限", n),
        }
    }

    pub fn magnitude(&self) -> u32 {
        match self {
            ConsumableEffect::RestoreHealth(n)
            | ConsumableEffect::RestoreQi(n)
            | ConsumableEffect::RaiseMaxQi(n) => *n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Equipment {
        slot: EquipmentSlot,
        bonuses: Vec<StatBonus>,
        /// The wearer's rank must be at or below this.
        required_rank: u8,
    },
    Consumable {
        effects: Vec<ConsumableEffect>,
        stack: u32,
    },
    Material {
        source: String,
        stack: u32,
    },
    QuestItem {
        quest_id: u32,
    },
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Equipment { slot, .. } => slot.name(),
            ItemKind::Consumable { .. } => "消耗品",
            ItemKind::Material { .. } => "材料",
            ItemKind::QuestItem { .. } => "任务物品",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub value: u32,
    pub kind: ItemKind,
}

impl Item {
    pub fn equipment(
        name: impl Into<String>,
        description: impl Into<String>,
        slot: EquipmentSlot,
        bonuses: Vec<StatBonus>,
        required_rank: u8,
        rarity: Rarity,
        value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rarity,
            value,
            kind: ItemKind::Equipment {
                slot,
                bonuses,
                required_rank,
            },
        }
    }

    pub fn consumable(
        name: impl Into<String>,
        description: impl Into<String>,
        effects: Vec<ConsumableEffect>,
        rarity: Rarity,
        value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rarity,
            value,
            kind: ItemKind::Consumable { effects, stack: 1 },
        }
    }

    pub fn material(
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
        rarity: Rarity,
        value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rarity,
            value,
            kind: ItemKind::Material {
                source: source.into(),
                stack: 1,
            },
        }
    }

    pub fn quest_item(
        name: impl Into<String>,
        description: impl Into<String>,
        quest_id: u32,
        rarity: Rarity,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rarity,
            value: 0,
            kind: ItemKind::QuestItem { quest_id },
        }
    }

    pub fn with_stack(mut self, count: u32) -> Self {
        self.set_stack(count);
        self
    }

    pub fn is_stackable(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Consumable { .. } | ItemKind::Material { .. }
        )
    }

    pub fn stack_count(&self) -> u32 {
        match &self.kind {
            ItemKind::Consumable { stack, .. } | ItemKind::Material { stack, .. } => *stack,
            _ => 1,
        }
    }

    /// No-op for non-stackable items.
    pub fn set_stack(&mut self, count: u32) {
        if let ItemKind::Consumable { stack, .. } | ItemKind::Material { stack, .. } =
            &mut self.kind
        {
            *stack = count;
        }
    }

    pub fn can_stack_with(&self, other: &Item) -> bool {
        self.is_stackable()
            && other.is_stackable()
            && self.name == other.name
            && self.kind.name() == other.kind.name()
            && self.rarity == other.rarity
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, ItemKind::Equipment { .. })
    }

    /// Name tagged with rarity, as shown in reward summaries.
    pub fn display_name(&self) -> String {
        format!("【{}】{}", self.rarity.name(), self.name)
    }

    /// Attack and defense granted by a piece of equipment.
    pub fn combat_bonuses(&self) -> Option<(u32, u32)> {
        match &self.kind {
            ItemKind::Equipment { bonuses, .. } => {
                let sum = |kind: StatKind| {
                    bonuses
                        .iter()
                        .filter(|b| b.kind == kind)
                        .map(|b| b.amount)
                        .sum::<f64>()
                        .max(0.0) as u32
                };
                Some((sum(StatKind::Attack), sum(StatKind::Defense)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herb() -> Item {
        Item::material("草药", "常见的草药", "野外采集", Rarity::Common, 5)
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Fine);
        assert!(Rarity::Rare < Rarity::Legendary);
        assert_eq!(Rarity::Legendary.name(), "传说");
    }

    #[test]
    fn test_stackable_kinds() {
        assert!(herb().is_stackable());
        assert!(!Item::quest_item("信", "", 5, Rarity::Rare).is_stackable());
    }

    #[test]
    fn test_stack_compatibility_requires_same_rarity() {
        let a = herb();
        let mut b = herb().with_stack(3);
        assert!(a.can_stack_with(&b));
        b.rarity = Rarity::Fine;
        assert!(!a.can_stack_with(&b));
    }

    #[test]
    fn test_set_stack_ignored_for_equipment() {
        let mut sword = Item::equipment(
            "木剑",
            "",
            EquipmentSlot::Weapon,
            vec![StatBonus::new(StatKind::Attack, 5.0)],
            9,
            Rarity::Common,
            10,
        );
        sword.set_stack(4);
        assert_eq!(sword.stack_count(), 1);
        assert_eq!(sword.combat_bonuses(), Some((5, 0)));
    }

    #[test]
    fn test_display_name_has_rarity_tag() {
        let item = Item::quest_item("《气之要诀》", "", 5, Rarity::Rare);
        assert_eq!(item.display_name(), "【稀有】《气之要诀》");
    }
}
