//! Inventory system
//!
//! An ordered list of carried items. Gold is kept as a regular item stack.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemCategory, ItemId, ItemKind};

/// Items carried by the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an inventory exactly as stored, without merging stacks
    pub(crate) fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging it into a matching stack.
    /// Returns the id of the stack now holding it.
    pub fn add(&mut self, item: Item) -> ItemId {
        if let Some(stack) = self.items.iter_mut().find(|i| i.stacks_with(&item)) {
            stack.count += item.count;
            return stack.id;
        }
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.position(id)?;
        Some(self.items.remove(idx))
    }

    /// Take `count` units off a stack, removing it when emptied
    pub fn split(&mut self, id: ItemId, count: u32, new_id: ItemId) -> Option<Item> {
        let idx = self.position(id)?;
        let available = self.items[idx].count;
        if count == 0 || count > available {
            return None;
        }
        if count == available {
            return Some(self.items.remove(idx));
        }
        let stack = &mut self.items[idx];
        stack.count -= count;
        let mut part = stack.clone();
        part.id = new_id;
        part.count = count;
        Some(part)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    pub fn items_of_category(&self, category: ItemCategory) -> Vec<&Item> {
        self.items.iter().filter(|i| i.category() == category).collect()
    }

    /// Total weight in grams
    pub fn weight(&self) -> u32 {
        self.items.iter().map(|i| i.weight()).sum()
    }

    /// Highest item id in use
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(|i| i.id).max()
    }

    /// Gold carried
    pub fn gold(&self) -> u32 {
        self.items
            .iter()
            .filter(|i| i.kind == ItemKind::Gold)
            .map(|i| i.count)
            .sum()
    }

    /// Set the gold stack to an amount, creating or dropping it as needed
    pub fn set_gold(&mut self, amount: u32, new_id: impl FnOnce() -> ItemId) {
        match self.items.iter().position(|i| i.kind == ItemKind::Gold) {
            Some(idx) if amount == 0 => {
                self.items.remove(idx);
            }
            Some(idx) => self.items[idx].count = amount,
            None if amount > 0 => self.items.push(Item::gold(new_id(), amount)),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::item::{PotionKind, WeaponKind};

    #[test]
    fn test_add_and_stack() {
        let mut inv = Inventory::new();
        let a = inv.add(Item::new(1, ItemKind::Potion(PotionKind::Healing)));
        let b = inv.add(Item::new(2, ItemKind::Potion(PotionKind::Healing)).with_count(2));
        assert_eq!(a, b);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get(1).map(|i| i.count), Some(3));

        inv.add(Item::new(3, ItemKind::Weapon(WeaponKind::Dagger)));
        inv.add(Item::new(4, ItemKind::Weapon(WeaponKind::Dagger)));
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_split() {
        let mut inv = Inventory::new();
        inv.add(Item::new(1, ItemKind::Potion(PotionKind::Water)).with_count(3));
        let part = inv.split(1, 2, 9).expect("split");
        assert_eq!(part.id, 9);
        assert_eq!(part.count, 2);
        assert_eq!(inv.get(1).map(|i| i.count), Some(1));
        assert!(inv.split(1, 5, 10).is_none());
        let rest = inv.split(1, 1, 11).expect("last unit");
        assert_eq!(rest.id, 1);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_weight_and_gold() {
        let mut inv = Inventory::new();
        inv.add(Item::new(1, ItemKind::Weapon(WeaponKind::Dagger)));
        assert_eq!(inv.weight(), 600);
        let mut next = 10;
        inv.set_gold(100, || {
            next += 1;
            next
        });
        assert_eq!(inv.gold(), 100);
        assert_eq!(inv.weight(), 700);
        assert_eq!(inv.max_id(), Some(11));
    }
}
