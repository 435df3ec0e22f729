//! Item identification
//!
//! Per-subtype knowledge for the identifiable categories.

use serde::{Deserialize, Serialize};

use super::item::{AmuletKind, Item, ItemCategory, ItemId, ItemKind, PotionKind, RingKind, ScrollKind};
use crate::entities::player::Player;
use crate::progression::spells::SpellKind;

/// Known-flags per subtype, one table per identifiable category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    pub amulets: Vec<bool>,
    pub books: Vec<bool>,
    pub potions: Vec<bool>,
    pub rings: Vec<bool>,
    pub scrolls: Vec<bool>,
}

impl Default for Identification {
    fn default() -> Self {
        Self::new()
    }
}

impl Identification {
    pub fn new() -> Self {
        Self {
            amulets: vec![false; AmuletKind::COUNT],
            books: vec![false; SpellKind::COUNT],
            potions: vec![false; PotionKind::COUNT],
            rings: vec![false; RingKind::COUNT],
            scrolls: vec![false; ScrollKind::COUNT],
        }
    }

    fn table(&self, category: ItemCategory) -> Option<&Vec<bool>> {
        match category {
            ItemCategory::Amulet => Some(&self.amulets),
            ItemCategory::Book => Some(&self.books),
            ItemCategory::Potion => Some(&self.potions),
            ItemCategory::Ring => Some(&self.rings),
            ItemCategory::Scroll => Some(&self.scrolls),
            _ => None,
        }
    }

    fn table_mut(&mut self, category: ItemCategory) -> Option<&mut Vec<bool>> {
        match category {
            ItemCategory::Amulet => Some(&mut self.amulets),
            ItemCategory::Book => Some(&mut self.books),
            ItemCategory::Potion => Some(&mut self.potions),
            ItemCategory::Ring => Some(&mut self.rings),
            ItemCategory::Scroll => Some(&mut self.scrolls),
            _ => None,
        }
    }

    /// Whether the subtype is recognised; non-identifiable categories always are
    pub fn is_known(&self, kind: &ItemKind) -> bool {
        match self.table(kind.category()) {
            Some(table) => table.get(kind.subtype_index()).copied().unwrap_or(false),
            None => true,
        }
    }

    pub fn set_known(&mut self, kind: &ItemKind) {
        let idx = kind.subtype_index();
        if let Some(flag) = self
            .table_mut(kind.category())
            .and_then(|table| table.get_mut(idx))
        {
            *flag = true;
        }
    }

    /// Names of all identified subtypes, grouped by category
    pub fn known_names(&self) -> Vec<(ItemCategory, Vec<String>)> {
        let mut groups = Vec::new();

        let amulets: Vec<String> = AmuletKind::ALL
            .iter()
            .filter(|k| self.is_known(&ItemKind::Amulet(**k)))
            .map(|k| ItemKind::Amulet(*k).name())
            .collect();
        let books: Vec<String> = SpellKind::ALL
            .iter()
            .filter(|k| self.is_known(&ItemKind::Book(**k)))
            .map(|k| ItemKind::Book(*k).name())
            .collect();
        let potions: Vec<String> = PotionKind::ALL
            .iter()
            .filter(|k| self.is_known(&ItemKind::Potion(**k)))
            .map(|k| ItemKind::Potion(*k).name())
            .collect();
        let rings: Vec<String> = RingKind::ALL
            .iter()
            .filter(|k| self.is_known(&ItemKind::Ring(**k)))
            .map(|k| ItemKind::Ring(*k).name())
            .collect();
        let scrolls: Vec<String> = ScrollKind::ALL
            .iter()
            .filter(|k| self.is_known(&ItemKind::Scroll(**k)))
            .map(|k| ItemKind::Scroll(*k).name())
            .collect();

        for (category, names) in [
            (ItemCategory::Amulet, amulets),
            (ItemCategory::Book, books),
            (ItemCategory::Potion, potions),
            (ItemCategory::Ring, rings),
            (ItemCategory::Scroll, scrolls),
        ] {
            if !names.is_empty() {
                groups.push((category, names));
            }
        }
        groups
    }
}

impl Player {
    /// Whether the player recognises the item's subtype
    pub fn item_type_known(&self, item: &Item) -> bool {
        self.item_type_known_by_kind(&item.kind)
    }

    pub fn item_type_known_by_kind(&self, kind: &ItemKind) -> bool {
        self.identified.is_known(kind)
    }

    /// Subtype, blessing and (where relevant) enchantment are all known
    pub fn item_identified(&self, item: &Item) -> bool {
        if !self.item_type_known(item) {
            return false;
        }
        if item.category() == ItemCategory::Gold || item.category() == ItemCategory::Gem {
            return true;
        }
        if !item.blessed_known {
            return false;
        }
        !item.category().has_bonus() || item.bonus_known
    }

    /// Reveal everything about a carried item
    pub fn identify_item(&mut self, id: ItemId) -> bool {
        let Some(item) = self.inventory.get_mut(id) else {
            return false;
        };
        item.blessed_known = true;
        item.bonus_known = true;
        let kind = item.kind;
        self.identified.set_known(&kind);
        true
    }

    /// Text listing all identified item types
    pub fn identified_list(&self) -> Option<String> {
        let groups = self.identified.known_names();
        if groups.is_empty() {
            return None;
        }
        let mut text = String::new();
        for (category, names) in groups {
            text.push_str(&format!("{}\n", crate::items::item::capitalize(category.plural_name())));
            for name in names {
                text.push_str(&format!("  - {}\n", name));
            }
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Session;
    use crate::items::item::WeaponKind;

    #[test]
    fn test_known_flags() {
        let mut ident = Identification::new();
        let potion = ItemKind::Potion(PotionKind::Healing);
        assert!(!ident.is_known(&potion));
        ident.set_known(&potion);
        assert!(ident.is_known(&potion));
        assert!(ident.potions[PotionKind::Healing as usize]);
        // Weapons are always recognised
        assert!(ident.is_known(&ItemKind::Weapon(WeaponKind::Dagger)));
    }

    #[test]
    fn test_identify_item() {
        let mut session = Session::seeded(2);
        let mut player = Player::new(&mut session, "Sage", Default::default());
        let id = session.next_item_id();
        player
            .inventory
            .add(Item::new(id, ItemKind::Ring(RingKind::Protection)).with_bonus(2));
        let ring = player.inventory.get(id).expect("ring").clone();
        assert!(!player.item_type_known(&ring));
        assert!(!player.item_identified(&ring));

        assert!(player.identify_item(id));
        let ring = player.inventory.get(id).expect("ring");
        assert!(player.item_identified(ring));
        assert_eq!(ring.describe(true), "an uncursed +2 ring of protection");
    }

    #[test]
    fn test_identified_list() {
        let mut session = Session::seeded(2);
        let player = Player::new(&mut session, "Sage", Default::default());
        let text = player.identified_list().expect("one potion known");
        assert!(text.contains("Potions"));
        assert!(text.contains("potion of cure dianthroritis"));
    }
}
