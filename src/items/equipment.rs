use super::types::{EquipmentSlot, Item, ItemKind};
use crate::character::stats::{apply_bonuses, remove_bonuses, StatBlock};
use serde::{Deserialize, Serialize};

/// Worn weapon and armor. The bonuses of whatever sits in a slot are
/// already folded into the wearer's `StatBlock`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        }
    }

    /// Puts `item` into its slot, moving bonuses on `stats`, and hands back
    /// whatever was there. Non-equipment is returned untouched.
    pub fn equip(&mut self, stats: &mut StatBlock, item: Item) -> Option<Item> {
        let slot = match &item.kind {
            ItemKind::Equipment { slot, .. } => *slot,
            _ => return Some(item),
        };

        let previous = self.slot_mut(slot).take();
        if let Some(ItemKind::Equipment { bonuses, .. }) = previous.as_ref().map(|p| &p.kind) {
            remove_bonuses(stats, bonuses);
        }
        if let ItemKind::Equipment { bonuses, .. } = &item.kind {
            apply_bonuses(stats, bonuses);
        }
        *self.slot_mut(slot) = Some(item);
        previous
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn name_in(&self, slot: EquipmentSlot) -> &str {
        self.get(slot).map(|i| i.name.as_str()).unwrap_or("无")
    }
}
