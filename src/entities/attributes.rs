//! Attribute resolution
//!
//! Effective values are always recomputed from base values and active effects.

use serde::{Deserialize, Serialize};

use crate::combat::status::EffectKind;
use crate::entities::player::Player;
use crate::items::equipment::EquipSlot;

/// Normal movement speed
pub const SPEED_NORMAL: i32 = 100;

/// The six primary attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Intelligence,
    Wisdom,
    Constitution,
    Dexterity,
    Charisma,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Constitution,
        Attribute::Dexterity,
        Attribute::Charisma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Intelligence => "intelligence",
            Attribute::Wisdom => "wisdom",
            Attribute::Constitution => "constitution",
            Attribute::Dexterity => "dexterity",
            Attribute::Charisma => "charisma",
        }
    }

    pub fn inc_effect(&self) -> EffectKind {
        match self {
            Attribute::Strength => EffectKind::IncStr,
            Attribute::Intelligence => EffectKind::IncInt,
            Attribute::Wisdom => EffectKind::IncWis,
            Attribute::Constitution => EffectKind::IncCon,
            Attribute::Dexterity => EffectKind::IncDex,
            Attribute::Charisma => EffectKind::IncCha,
        }
    }

    pub fn dec_effect(&self) -> EffectKind {
        match self {
            Attribute::Strength => EffectKind::DecStr,
            Attribute::Intelligence => EffectKind::DecInt,
            Attribute::Wisdom => EffectKind::DecWis,
            Attribute::Constitution => EffectKind::DecCon,
            Attribute::Dexterity => EffectKind::DecDex,
            Attribute::Charisma => EffectKind::DecCha,
        }
    }

    /// The attribute an increase or decrease effect modifies
    pub fn from_effect(kind: EffectKind) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.inc_effect() == kind || a.dec_effect() == kind)
    }
}

/// Base attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub constitution: i32,
    pub dexterity: i32,
    pub charisma: i32,
}

impl Attributes {
    pub fn get(&self, attr: Attribute) -> i32 {
        match attr {
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Constitution => self.constitution,
            Attribute::Dexterity => self.dexterity,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn get_mut(&mut self, attr: Attribute) -> &mut i32 {
        match attr {
            Attribute::Strength => &mut self.strength,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Charisma => &mut self.charisma,
        }
    }
}

impl Player {
    /// Base value plus active effects, heroism and dizziness
    pub fn attribute(&self, attr: Attribute) -> i32 {
        self.attributes.get(attr)
            + self.effect_magnitude(attr.inc_effect())
            - self.effect_magnitude(attr.dec_effect())
            + self.effect_magnitude(EffectKind::Heroism)
            - self.effect_magnitude(EffectKind::Dizziness)
    }

    pub fn strength(&self) -> i32 {
        self.attribute(Attribute::Strength)
    }

    pub fn intelligence(&self) -> i32 {
        self.attribute(Attribute::Intelligence)
    }

    pub fn wisdom(&self) -> i32 {
        self.attribute(Attribute::Wisdom)
    }

    pub fn constitution(&self) -> i32 {
        self.attribute(Attribute::Constitution)
    }

    pub fn dexterity(&self) -> i32 {
        self.attribute(Attribute::Dexterity)
    }

    pub fn charisma(&self) -> i32 {
        self.attribute(Attribute::Charisma)
    }

    pub fn hp_max(&self) -> i32 {
        self.hp_max + self.effect_magnitude(EffectKind::IncHpMax)
            - self.effect_magnitude(EffectKind::DecHpMax)
    }

    pub fn mp_max(&self) -> i32 {
        self.mp_max + self.effect_magnitude(EffectKind::IncMpMax)
            - self.effect_magnitude(EffectKind::DecMpMax)
    }

    /// Worn armour plus protective effects
    pub fn armor_class(&self) -> i32 {
        let worn: i32 = EquipSlot::ALL
            .iter()
            .filter(|slot| slot.is_armour())
            .filter_map(|slot| self.equipped_item(*slot))
            .map(|item| item.armour_ac())
            .sum();
        worn + self.effect_magnitude(EffectKind::Protection)
            + self.effect_magnitude(EffectKind::Invulnerability)
    }

    /// Wielded weapon plus damage effects, never below 1
    pub fn weapon_class(&self) -> i32 {
        let wielded = self
            .equipped_item(EquipSlot::Weapon)
            .map(|item| item.weapon_wc())
            .unwrap_or(0);
        (wielded + self.effect_magnitude(EffectKind::IncDamage)
            - self.effect_magnitude(EffectKind::Sickness))
        .max(1)
    }

    pub fn speed(&self) -> i32 {
        self.speed + self.effect_magnitude(EffectKind::Speed)
            - self.effect_magnitude(EffectKind::Slowness)
    }

    /// Keep hp/mp within their effective maxima
    pub fn clamp_vitals(&mut self) {
        self.hp = self.hp.min(self.hp_max());
        self.mp = self.mp.min(self.mp_max()).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::Effect;
    use crate::game::state::Session;
    use crate::items::item::{ArmourKind, Item, ItemKind};

    fn player() -> (Session, Player) {
        let mut session = Session::seeded(11);
        let player = Player::new(&mut session, "Tester", Default::default());
        (session, player)
    }

    #[test]
    fn test_effective_strength() {
        let (mut session, mut player) = player();
        player.attributes.strength = 14;
        player.add_effect(&mut session, Effect::new(EffectKind::IncStr).with_amount(3).with_turns(10));
        player.add_effect(&mut session, Effect::new(EffectKind::DecStr).with_amount(1).with_turns(10));
        player.add_effect(&mut session, Effect::new(EffectKind::Heroism).with_amount(2));
        assert_eq!(player.strength(), 18);
        // Heroism applies to every attribute
        assert_eq!(player.charisma(), player.attributes.charisma + 2);
    }

    #[test]
    fn test_armor_class() {
        let (mut session, mut player) = player();
        // Starting leather armour +1
        assert_eq!(player.armor_class(), 3);

        let id = session.next_item_id();
        player.inventory.add(Item::new(id, ItemKind::Armour(ArmourKind::Helmet)));
        player.equip_item(id);
        assert_eq!(player.armor_class(), 4);

        player.add_effect(&mut session, Effect::new(EffectKind::Protection).with_amount(2));
        assert_eq!(player.armor_class(), 6);
    }

    #[test]
    fn test_weapon_class_floor() {
        let (mut session, mut player) = player();
        // Starting dagger
        assert_eq!(player.weapon_class(), 3);
        player.add_effect(&mut session, Effect::new(EffectKind::Sickness).with_amount(10));
        assert_eq!(player.weapon_class(), 1);
    }

    #[test]
    fn test_speed_and_max_values() {
        let (mut session, mut player) = player();
        assert_eq!(player.speed(), SPEED_NORMAL);
        player.add_effect(&mut session, Effect::new(EffectKind::Slowness).with_amount(50));
        assert_eq!(player.speed(), 50);

        let base = player.hp_max;
        player.add_effect(&mut session, Effect::new(EffectKind::IncHpMax).with_amount(5).with_turns(10));
        assert_eq!(player.hp_max(), base + 5);
    }
}
