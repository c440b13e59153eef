//! The player's bag and the consumable/equip actions that draw from it.

use super::equipment::Equipment;
use super::types::{ConsumableEffect, Item, ItemKind};
use crate::character::stats::StatBlock;
use crate::core::constants::INVENTORY_CAPACITY;
use crate::core::errors::Rejection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total count of items with the given name across all stacks.
    pub fn count_named(&self, name: &str) -> u32 {
        self.items
            .iter()
            .filter(|i| i.name == name)
            .map(Item::stack_count)
            .sum()
    }

    /// Adds an item, merging stackables into a matching stack first.
    ///
    /// A merge succeeds even when every slot is taken.
    pub fn add(&mut self, item: Item) -> Result<String, Rejection> {
        if item.is_stackable() {
            if let Some(existing) = self.items.iter_mut().find(|i| i.can_stack_with(&item)) {
                let incoming = item.stack_count();
                existing.set_stack(existing.stack_count() + incoming);
                return Ok(format!("获得物品：{} x{}", item.name, incoming));
            }
        }

        if self.is_full() {
            return Err(Rejection::InventoryFull { name: item.name });
        }

        let message = if item.is_stackable() && item.stack_count() > 1 {
            format!("获得物品：{} x{}", item.name, item.stack_count())
        } else {
            format!("获得物品：{}", item.name)
        };
        self.items.push(item);
        Ok(message)
    }

    /// Removes and returns the whole entry at `index`.
    pub fn take(&mut self, index: usize) -> Result<Item, Rejection> {
        if index >= self.items.len() {
            return Err(Rejection::UnknownIndex { index });
        }
        Ok(self.items.remove(index))
    }

    /// Puts an item back at a position, used when an equip swap returns the
    /// previous piece.
    fn insert(&mut self, index: usize, item: Item) {
        let at = index.min(self.items.len());
        self.items.insert(at, item);
    }
}

/// Uses the item at `index`.
///
/// Consumables apply their effects and lose one from the stack. Equipment is
/// equipped. Materials and quest items are rejected with an explanation.
pub fn use_item(
    inventory: &mut Inventory,
    equipment: &mut Equipment,
    stats: &mut StatBlock,
    rank: u8,
    index: usize,
) -> Result<String, Rejection> {
    let item = inventory
        .get(index)
        .ok_or(Rejection::UnknownIndex { index })?;

    match &item.kind {
        ItemKind::Equipment { .. } => {
            equip_from_inventory(inventory, equipment, stats, rank, index)
        }
        ItemKind::Consumable { effects, stack } => {
            let effects = effects.clone();
            let remaining = stack.saturating_sub(1);
            let name = item.name.clone();

            let described: Vec<String> = effects
                .iter()
                .map(|effect| {
                    apply_consumable(stats, effect);
                    effect.describe()
                })
                .collect();

            if remaining == 0 {
                inventory.items.remove(index);
                Ok(format!(
                    "你使用了{}，{}。物品已用尽。",
                    name,
                    described.join(", ")
                ))
            } else {
                inventory.items[index].set_stack(remaining);
                Ok(format!(
                    "你使用了{}，{}。剩余{}个。",
                    name,
                    described.join(", "),
                    remaining
                ))
            }
        }
        ItemKind::Material { .. } => Err(Rejection::NotUsable {
            message: format!("{}是一种材料，需要在合适的地方使用。", item.name),
        }),
        ItemKind::QuestItem { .. } => Err(Rejection::NotUsable {
            message: format!("{}似乎是某个任务需要的物品。", item.name),
        }),
    }
}

fn apply_consumable(stats: &mut StatBlock, effect: &ConsumableEffect) {
    match *effect {
        ConsumableEffect::RestoreHealth(n) => {
            stats.restore_health(n);
        }
        ConsumableEffect::RestoreQi(n) => {
            stats.restore_qi(n);
        }
        ConsumableEffect::RaiseMaxQi(n) => {
            stats.max_qi = stats.max_qi.saturating_add(n);
            stats.restore_qi(n);
        }
    }
}

/// Moves a piece of equipment from the bag into its slot. The piece it
/// replaces goes back into the bag at the same position.
pub fn equip_from_inventory(
    inventory: &mut Inventory,
    equipment: &mut Equipment,
    stats: &mut StatBlock,
    rank: u8,
    index: usize,
) -> Result<String, Rejection> {
    let item = inventory
        .get(index)
        .ok_or(Rejection::UnknownIndex { index })?;

    let required_rank = match &item.kind {
        ItemKind::Equipment { required_rank, .. } => *required_rank,
        _ => {
            return Err(Rejection::NotUsable {
                message: "无法装备此物品。".to_string(),
            })
        }
    };
    if rank > required_rank {
        return Err(Rejection::CannotEquip {
            name: item.name.clone(),
        });
    }

    let item = inventory.take(index)?;
    let name = item.name.clone();
    if let Some(previous) = equipment.equip(stats, item) {
        inventory.insert(index, previous);
    }
    log::debug!("equipped {}", name);
    Ok(format!("你装备了{}。", name))
}
