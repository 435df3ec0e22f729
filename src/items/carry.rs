//! Carrying capacity
//!
//! Maps pack weight and strength to a carry band and keeps the matching
//! effect active on the player.

use crate::combat::status::{Effect, EffectKind};
use crate::entities::player::Player;
use crate::items::item::{capitalize, Item, ItemId};

/// Grams a player can carry per point of strength before being burdened
pub const GRAMS_PER_STRENGTH: i64 = 2000;

/// Carry load classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryBand {
    Normal,
    Burdened,
    Overstrained,
}

/// Weight at which the burdened band starts
pub fn carry_threshold(strength: i32) -> i64 {
    GRAMS_PER_STRENGTH * strength as i64
}

/// Weight at which the overstrained band starts (1.3 times the threshold)
pub fn overstrain_threshold(strength: i32) -> i64 {
    carry_threshold(strength) * 13 / 10
}

/// Classify a load for a given effective strength
pub fn carry_band(weight: u32, strength: i32) -> CarryBand {
    let weight = weight as i64;
    if weight < carry_threshold(strength) {
        CarryBand::Normal
    } else if weight < overstrain_threshold(strength) {
        CarryBand::Burdened
    } else {
        CarryBand::Overstrained
    }
}

impl Player {
    pub fn carry_band(&self) -> CarryBand {
        carry_band(self.inventory.weight(), self.strength())
    }

    /// Decide whether an item may join the pack
    pub fn inv_pre_add(&mut self, item: &Item) -> bool {
        if self.has_effect(EffectKind::Overstrained) {
            self.log.add("You are already overloaded!");
            return false;
        }

        let total = self.inventory.weight() as i64 + item.weight() as i64;
        if total > overstrain_threshold(self.strength()) {
            let desc = item.describe(self.item_type_known(item));
            let verb = if item.count > 1 { "are" } else { "is" };
            self.log.add(format!("{} {} too heavy for you.", capitalize(&desc), verb));
            return false;
        }

        true
    }

    /// Keep exactly one carry-band effect in line with the current load
    pub fn recalc_carry_state(&mut self) {
        match self.carry_band() {
            CarryBand::Normal => {
                self.remove_effect(EffectKind::Burdened);
                self.remove_effect(EffectKind::Overstrained);
            }
            CarryBand::Burdened => {
                self.remove_effect_silently(EffectKind::Overstrained);
                if !self.has_effect(EffectKind::Burdened) {
                    self.attach_band_effect(EffectKind::Burdened);
                }
            }
            CarryBand::Overstrained => {
                self.remove_effect_silently(EffectKind::Burdened);
                if !self.has_effect(EffectKind::Overstrained) {
                    self.attach_band_effect(EffectKind::Overstrained);
                }
            }
        }
    }

    fn attach_band_effect(&mut self, kind: EffectKind) {
        log::debug!("Carry band changed: {:?}", kind);
        let effect = Effect::new(kind);
        if let Some(msg) = effect.msg_start() {
            self.log.add(msg);
        }
        self.effects.add(effect);
    }

    /// Add an item through the pre-add hook, recomputing the load afterwards.
    /// Hands the item back if it was refused.
    pub fn add_to_inventory(&mut self, item: Item) -> Result<ItemId, Item> {
        if !self.inv_pre_add(&item) {
            return Err(item);
        }
        let id = self.inventory.add(item);
        self.recalc_carry_state();
        Ok(id)
    }

    /// Remove an item and recompute the load
    pub fn remove_from_inventory(&mut self, id: ItemId) -> Option<Item> {
        let item = self.inventory.remove(id)?;
        self.recalc_carry_state();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Session;
    use crate::items::item::{ArmourKind, ItemKind};
    use proptest::prelude::*;

    /// A player with the given base strength and an empty pack
    fn unarmed(strength: i32) -> (Session, Player) {
        let mut session = Session::seeded(5);
        let mut player = Player::new(&mut session, "Porter", Default::default());
        player.equipment = Default::default();
        player.inventory = Default::default();
        player.attributes.strength = strength;
        player.recalc_carry_state();
        (session, player)
    }

    /// Plate armour pieces weigh 22500g; build loads from armour and gold
    fn load(session: &mut Session, grams: u32) -> Item {
        Item::new(session.next_item_id(), ItemKind::Gold).with_count(grams)
    }

    #[test]
    fn test_bands() {
        assert_eq!(carry_band(31999, 16), CarryBand::Normal);
        assert_eq!(carry_band(32000, 16), CarryBand::Burdened);
        assert_eq!(carry_band(41599, 16), CarryBand::Burdened);
        assert_eq!(carry_band(41600, 16), CarryBand::Overstrained);
    }

    #[test]
    fn test_burdened_then_overstrained() {
        let (mut session, mut player) = unarmed(16);
        assert_eq!(carry_threshold(player.strength()), 32000);

        let plate = Item::new(session.next_item_id(), ItemKind::Armour(ArmourKind::PlateArmour));
        assert!(player.add_to_inventory(plate).is_ok());
        let gold = load(&mut session, 10500);
        assert!(player.add_to_inventory(gold).is_ok());
        assert_eq!(player.inventory.weight(), 33000);
        assert!(player.has_effect(EffectKind::Burdened));
        assert!(!player.has_effect(EffectKind::Overstrained));
        assert!(player.log.contains("You are burdened."));

        // 42000g would pass the 41600g limit
        let too_much = load(&mut session, 9000);
        assert!(player.add_to_inventory(too_much).is_err());
        assert!(player.log.contains("are too heavy for you."));
        assert_eq!(player.inventory.weight(), 33000);
        assert!(player.has_effect(EffectKind::Burdened));

        let more = load(&mut session, 8600);
        assert!(player.add_to_inventory(more).is_ok());
        assert_eq!(player.inventory.weight(), 41600);
        assert!(player.has_effect(EffectKind::Overstrained));
        assert!(!player.has_effect(EffectKind::Burdened));

        let refused = Item::new(session.next_item_id(), ItemKind::Armour(ArmourKind::Helmet));
        assert!(player.add_to_inventory(refused).is_err());
        assert!(player.log.contains("You are already overloaded!"));
        assert_eq!(player.inventory.weight(), 41600);
    }

    #[test]
    fn test_light_item_refused_near_limit() {
        let (mut session, mut player) = unarmed(16);
        let gold = load(&mut session, 41000);
        assert!(player.add_to_inventory(gold).is_ok());
        assert!(player.has_effect(EffectKind::Burdened));
        assert!(!player.has_effect(EffectKind::Overstrained));

        let purse = load(&mut session, 1000);
        assert!(player.add_to_inventory(purse).is_err());
        assert!(player.log.contains("too heavy for you."));
        assert!(!player.log.contains("You are already overloaded!"));
        assert_eq!(player.inventory.weight(), 41000);

        let coins = load(&mut session, 600);
        assert!(player.add_to_inventory(coins).is_ok());
        assert!(player.has_effect(EffectKind::Overstrained));
    }

    #[test]
    fn test_band_switch_is_quiet() {
        let (mut session, mut player) = unarmed(16);
        let gold = load(&mut session, 40000);
        player.add_to_inventory(gold).ok();
        assert!(player.has_effect(EffectKind::Burdened));

        player.attributes.strength = 10;
        player.recalc_carry_state();
        assert!(player.has_effect(EffectKind::Overstrained));
        assert!(!player.log.contains("You are no longer burdened."));

        player.attributes.strength = 30;
        player.recalc_carry_state();
        assert!(!player.has_effect(EffectKind::Overstrained));
        assert!(player.log.contains("You are no longer overloaded."));
    }

    #[test]
    fn test_too_heavy() {
        let (mut session, mut player) = unarmed(5);
        let plate = Item::new(session.next_item_id(), ItemKind::Armour(ArmourKind::PlateArmour));
        assert!(player.add_to_inventory(plate).is_err());
        assert!(player.log.contains("A plate armour is too heavy for you."));
    }

    #[test]
    fn test_recalc_is_idempotent() {
        let (mut session, mut player) = unarmed(16);
        let gold = load(&mut session, 35000);
        player.add_to_inventory(gold).ok();
        let log_len = player.log.len();
        let effects = player.effects.clone();
        player.recalc_carry_state();
        player.recalc_carry_state();
        assert_eq!(player.log.len(), log_len);
        assert_eq!(player.effects, effects);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_band_effect(weights in proptest::collection::vec(0u32..20000, 0..8), strength in 1i32..30) {
            let (mut session, mut player) = unarmed(strength);
            for grams in weights {
                let gold = load(&mut session, grams.max(1));
                let _ = player.add_to_inventory(gold);
                let burdened = player.has_effect(EffectKind::Burdened);
                let over = player.has_effect(EffectKind::Overstrained);
                prop_assert!(!(burdened && over));
                match player.carry_band() {
                    CarryBand::Normal => prop_assert!(!burdened && !over),
                    CarryBand::Burdened => prop_assert!(burdened),
                    CarryBand::Overstrained => prop_assert!(over),
                }
            }
        }
    }
}
