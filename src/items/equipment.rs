//! Equipment system
//!
//! Ten equipment slots referencing inventory items by id, and the player's
//! equip/unequip transitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::item::{capitalize, ArmourCategory, Item, ItemId, ItemKind};
use crate::entities::player::Player;
use crate::game::rng::GameRng;

/// Places an item can be worn or wielded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Amulet,
    Weapon,
    Boots,
    Cloak,
    Gloves,
    Helmet,
    Shield,
    Suit,
    RingLeft,
    RingRight,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 10] = [
        EquipSlot::Amulet,
        EquipSlot::Weapon,
        EquipSlot::Boots,
        EquipSlot::Cloak,
        EquipSlot::Gloves,
        EquipSlot::Helmet,
        EquipSlot::Shield,
        EquipSlot::Suit,
        EquipSlot::RingLeft,
        EquipSlot::RingRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Amulet => "Amulet",
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Boots => "Boots",
            EquipSlot::Cloak => "Cloak",
            EquipSlot::Gloves => "Gloves",
            EquipSlot::Helmet => "Helmet",
            EquipSlot::Shield => "Shield",
            EquipSlot::Suit => "Armour",
            EquipSlot::RingLeft => "Left ring",
            EquipSlot::RingRight => "Right ring",
        }
    }

    pub fn is_armour(&self) -> bool {
        matches!(
            self,
            EquipSlot::Boots
                | EquipSlot::Cloak
                | EquipSlot::Gloves
                | EquipSlot::Helmet
                | EquipSlot::Shield
                | EquipSlot::Suit
        )
    }

    pub fn for_armour(category: ArmourCategory) -> EquipSlot {
        match category {
            ArmourCategory::Boots => EquipSlot::Boots,
            ArmourCategory::Cloak => EquipSlot::Cloak,
            ArmourCategory::Gloves => EquipSlot::Gloves,
            ArmourCategory::Helmet => EquipSlot::Helmet,
            ArmourCategory::Shield => EquipSlot::Shield,
            ArmourCategory::Suit => EquipSlot::Suit,
        }
    }

    /// Natural slot for an item kind. Rings report the left hand.
    pub fn for_item(kind: &ItemKind) -> Option<EquipSlot> {
        match kind {
            ItemKind::Amulet(_) => Some(EquipSlot::Amulet),
            ItemKind::Weapon(_) => Some(EquipSlot::Weapon),
            ItemKind::Armour(kind) => Some(EquipSlot::for_armour(kind.category())),
            ItemKind::Ring(_) => Some(EquipSlot::RingLeft),
            _ => None,
        }
    }

    /// Whether an item of this kind can occupy the slot at all
    pub fn accepts(&self, kind: &ItemKind) -> bool {
        match EquipSlot::for_item(kind) {
            Some(EquipSlot::RingLeft) => {
                matches!(self, EquipSlot::RingLeft | EquipSlot::RingRight)
            }
            Some(slot) => slot == *self,
            None => false,
        }
    }
}

/// Which inventory item occupies each slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    slots: HashMap<EquipSlot, ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self { slots: HashMap::new() }
    }

    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        self.slots.get(&slot).copied()
    }

    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Slot an item is equipped in, if any
    pub fn slot_of(&self, id: ItemId) -> Option<EquipSlot> {
        EquipSlot::ALL.into_iter().find(|slot| self.get(*slot) == Some(id))
    }

    pub(crate) fn set(&mut self, slot: EquipSlot, id: ItemId) {
        self.slots.insert(slot, id);
    }

    pub(crate) fn clear(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.slots.remove(&slot)
    }

    /// Occupied slots in display order
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, ItemId)> + '_ {
        EquipSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|id| (slot, id)))
    }

    /// Occupied armour slots in display order
    pub fn occupied_armour(&self) -> Vec<EquipSlot> {
        self.iter()
            .map(|(slot, _)| slot)
            .filter(|slot| slot.is_armour())
            .collect()
    }

    fn wields_two_handed(&self, inventory: &Inventory) -> bool {
        self.get(EquipSlot::Weapon)
            .and_then(|id| inventory.get(id))
            .is_some_and(|w| w.is_two_handed())
    }

    /// The slot an item would go into, or None if it cannot be equipped now.
    /// This is the only place equip legality is decided.
    pub fn target_slot(&self, inventory: &Inventory, item: &Item) -> Option<EquipSlot> {
        if self.slot_of(item.id).is_some() {
            return None;
        }

        let slot = match EquipSlot::for_item(&item.kind)? {
            EquipSlot::RingLeft if !self.is_empty(EquipSlot::RingLeft) => EquipSlot::RingRight,
            slot => slot,
        };

        if !self.is_empty(slot) {
            return None;
        }

        // Shield and two-handed weapons exclude each other
        if slot == EquipSlot::Shield && self.wields_two_handed(inventory) {
            return None;
        }
        if slot == EquipSlot::Weapon && item.is_two_handed() && !self.is_empty(EquipSlot::Shield) {
            return None;
        }

        Some(slot)
    }
}

/// Turns needed to put on or take off an item in a slot
fn transition_time(slot: EquipSlot, item: &Item) -> u32 {
    match (slot, item.kind) {
        (_, ItemKind::Armour(kind)) => kind.don_time(),
        (EquipSlot::Weapon, _) => 2 + u32::from(item.is_two_handed()),
        _ => 2,
    }
}

impl Player {
    /// Slot the item is equipped in, if any
    pub fn item_is_equipped(&self, id: ItemId) -> Option<EquipSlot> {
        self.equipment.slot_of(id)
    }

    /// Whether the item could be equipped right now
    pub fn item_is_equippable(&self, item: &Item) -> bool {
        self.equipment.target_slot(&self.inventory, item).is_some()
    }

    /// Equip an item from the inventory. Returns the turns taken, 0 on failure.
    pub fn equip_item(&mut self, id: ItemId) -> u32 {
        let Some(item) = self.inventory.get(id) else {
            debug_assert!(false, "equipping item {} not in inventory", id);
            return 0;
        };
        let Some(slot) = self.equipment.target_slot(&self.inventory, item) else {
            return 0;
        };
        let kind = item.kind;
        self.equipment.set(slot, id);

        let message = match kind {
            ItemKind::Amulet(_) => {
                self.identified.set_known(&kind);
                self.describe_message(id, |d| format!("You put {} on.", d))
            }
            ItemKind::Ring(ring) => {
                self.identified.set_known(&kind);
                if ring.bonus_is_obvious() {
                    if let Some(item) = self.inventory.get_mut(id) {
                        item.bonus_known = true;
                    }
                }
                self.describe_message(id, |d| format!("You put {} on.", d))
            }
            ItemKind::Armour(_) => {
                if let Some(item) = self.inventory.get_mut(id) {
                    item.bonus_known = true;
                }
                self.describe_message(id, |d| format!("You are now wearing {}.", d))
            }
            _ => self.describe_message(id, |d| format!("You now wield {}.", d)),
        };
        self.log.add(message);

        if let Some(item) = self.inventory.get_mut(id) {
            if slot == EquipSlot::Weapon && item.cursed {
                item.blessed_known = true;
                let welded =
                    self.describe_message(id, |d| format!("{} welds itself into your hand.", capitalize(&d)));
                self.log.add(welded);
            }
        }
        log::debug!("Equipped item {} in {:?}", id, slot);

        self.add_item_effects(id);

        self.inventory
            .get(id)
            .map(|item| transition_time(slot, item))
            .unwrap_or(0)
    }

    /// Take off an equipped item. Cursed items refuse; returns the turns taken.
    pub fn unequip_item(&mut self, id: ItemId) -> u32 {
        let Some(slot) = self.equipment.slot_of(id) else {
            return 0;
        };
        let Some(item) = self.inventory.get_mut(id) else {
            debug_assert!(false, "equipped item {} not in inventory", id);
            return 0;
        };

        if item.cursed {
            let reveal = !item.blessed_known;
            let desc = item.describe(true);
            item.blessed_known = true;
            let message = if slot == EquipSlot::Weapon {
                format!("You can't put away {}. It's welded into your hands.", desc)
            } else if reveal {
                format!("You can not remove {}. It appears to be cursed.", desc)
            } else {
                format!("You can not remove {}.", desc)
            };
            self.log.add(message);
            return 0;
        }

        let time = transition_time(slot, item);
        let message = if slot == EquipSlot::Weapon {
            self.describe_message(id, |d| format!("You put away {}.", d))
        } else if slot.is_armour() {
            self.describe_message(id, |d| format!("You finish taking off {}.", d))
        } else {
            self.describe_message(id, |d| format!("You remove {}.", d))
        };

        self.remove_item_effects(id);
        self.equipment.clear(slot);
        self.log.add(message);
        log::debug!("Unequipped item {} from {:?}", id, slot);
        time
    }

    /// Remove whatever is in a slot regardless of curses
    pub(crate) fn force_unequip(&mut self, slot: EquipSlot) -> Option<ItemId> {
        let id = self.equipment.clear(slot)?;
        self.remove_item_effects(id);
        Some(id)
    }

    /// Pick a random occupied armour slot
    pub(crate) fn random_armour_slot(&self, rng: &mut GameRng) -> Option<EquipSlot> {
        let occupied = self.equipment.occupied_armour();
        if occupied.is_empty() {
            return None;
        }
        Some(occupied[rng.rand_0n(occupied.len() as i32) as usize])
    }

    fn describe_message(&self, id: ItemId, f: impl FnOnce(String) -> String) -> String {
        self.inventory
            .get(id)
            .map(|item| f(item.describe(self.item_type_known(item))))
            .unwrap_or_default()
    }
}
