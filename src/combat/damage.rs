//! Damage calculation
//!
//! Damage events and how the player takes them: resistances, armour and the
//! status effects some attacks inflict.

use serde::{Deserialize, Serialize};

use crate::combat::status::{Effect, EffectKind};
use crate::entities::monster::MonsterKind;
use crate::entities::player::Player;
use crate::game::death::DeathCause;
use crate::game::state::Session;
use crate::items::equipment::EquipSlot;
use crate::items::item::{AmuletKind, ItemKind};

/// What a damage event does to its receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magical,
    Fire,
    Cold,
    Acid,
    Water,
    Electricity,
    Poison,
    Blindness,
    Confusion,
    Paralysis,
    DecStr,
    DecDex,
    DrainLife,
}

/// How the damage was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Weapon,
    Magic,
    Claw,
    Bite,
    Sting,
    Slam,
    Kick,
    Touch,
    Breath,
    Gaze,
    Trap,
}

/// Who caused the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    None,
    Player,
    Monster(MonsterKind),
}

/// A single damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub kind: DamageType,
    pub attack: AttackType,
    pub amount: i32,
    pub source: DamageSource,
}

impl Damage {
    pub fn new(kind: DamageType, attack: AttackType, amount: i32, source: DamageSource) -> Self {
        Self {
            kind,
            attack,
            amount,
            source,
        }
    }

    /// Damage dealt by a monster
    pub fn from_monster(monster: MonsterKind, kind: DamageType, attack: AttackType, amount: i32) -> Self {
        Self::new(kind, attack, amount, DamageSource::Monster(monster))
    }
}

impl Player {
    pub(crate) fn wears_amulet(&self, kind: AmuletKind) -> bool {
        self.equipped_item(EquipSlot::Amulet)
            .map(|item| item.kind == ItemKind::Amulet(kind))
            .unwrap_or(false)
    }

    /// Reduce hp by the residual amount when positive
    fn suffer(&mut self, amount: i32, hurt: &str, spared: &str) {
        if amount > 0 {
            self.hp -= amount;
            self.log.add(hurt);
        } else {
            self.log.add(spared);
        }
    }

    /// Try to inflict a status effect; true if the player has it afterwards
    fn inflict(&mut self, session: &mut Session, kind: EffectKind, percent: i32) -> bool {
        if session.rng.chance(percent) {
            self.add_effect(session, Effect::new(kind));
        }
        self.has_effect(kind)
    }

    /// Take a damage event. `cause` is reported if the damage proves fatal.
    pub fn take_damage(&mut self, session: &mut Session, mut damage: Damage, cause: DeathCause) {
        if session.is_over() {
            return;
        }
        log::debug!("Player takes {:?} ({:?})", damage, cause);

        if let DamageSource::Monster(monster) = damage.source {
            if monster.is_demon() && self.wears_amulet(AmuletKind::Power) && session.rng.chance(75) {
                self.log
                    .add(format!("Your amulet cancels the {}'s attack.", monster.name()));
                return;
            }
        }

        match damage.kind {
            DamageType::Physical => {
                damage.amount -= self.armor_class();
                self.suffer(damage.amount, "Ouch!", "Your armour protects you.");
            }
            DamageType::Magical => {
                damage.amount -= self.effect_magnitude(EffectKind::ResistMagic);
                self.suffer(damage.amount, "Ouch!", "You resist.");
            }
            DamageType::Fire => {
                damage.amount -= self.effect_magnitude(EffectKind::ResistFire);
                self.suffer(damage.amount, "You suffer burns.", "The flames don't phase you.");
            }
            DamageType::Cold => {
                damage.amount -= self.effect_magnitude(EffectKind::ResistCold);
                self.suffer(
                    damage.amount,
                    "You suffer from frostbite.",
                    "It doesn't seem so cold.",
                );
            }
            DamageType::Acid => self.suffer(
                damage.amount,
                "You are splashed with acid.",
                "The acid doesn't affect you.",
            ),
            DamageType::Water => self.suffer(
                damage.amount,
                "You experience near-drowning.",
                "The water doesn't affect you.",
            ),
            DamageType::Electricity => self.suffer(
                damage.amount,
                "Zapp!",
                "As you are grounded nothing happens.",
            ),
            DamageType::Poison => {
                if cause == DeathCause::Effect(EffectKind::Poison) {
                    // A tick of the poison already in the veins
                    self.hp -= damage.amount;
                    self.log.add("You feel poison running through your veins.");
                } else {
                    damage.amount -= session.rng.rand_0n(self.constitution()).max(0);
                    if damage.amount > 0 {
                        let poison = Effect::new(EffectKind::Poison).with_amount(damage.amount);
                        self.add_effect(session, poison);
                    } else {
                        self.log.add("You resist the poison.");
                    }
                }
            }
            DamageType::Blindness => {
                if !self.inflict(session, EffectKind::Blindness, damage.amount) {
                    self.log.add("You are not blinded.");
                }
            }
            DamageType::Confusion | DamageType::Paralysis => {
                // A staring monster cannot be seen while blind
                if damage.attack == AttackType::Gaze && self.has_effect(EffectKind::Blindness) {
                    return;
                }
                let (kind, resisted) = if damage.kind == DamageType::Confusion {
                    (EffectKind::Confusion, "You are not confused.")
                } else {
                    (EffectKind::Paralysis, "You avoid eye contact.")
                };
                let percent = damage.amount - self.intelligence();
                if !self.inflict(session, kind, percent) {
                    self.log.add(resisted);
                }
            }
            DamageType::DecStr | DamageType::DecDex => {
                damage.amount -= self.constitution();
                if session.rng.chance(damage.amount) {
                    let kind = if damage.kind == DamageType::DecStr {
                        EffectKind::DecStr
                    } else {
                        EffectKind::DecDex
                    };
                    let drain = Effect::new(kind).with_turns((damage.amount * 10) as u32);
                    self.add_effect(session, drain);

                    let value = if kind == EffectKind::DecStr {
                        self.strength()
                    } else {
                        self.dexterity()
                    };
                    if value < 1 && self.die(session, DeathCause::Effect(kind)) {
                        return;
                    }
                } else {
                    self.log.add("You are not affected.");
                }
            }
            DamageType::DrainLife => {
                if self.has_effect(EffectKind::UndeadProtection)
                    || !session.rng.chance(damage.amount - self.wisdom())
                {
                    self.log.add("You are not affected.");
                } else {
                    self.log.add("Your life energy is drained.");
                    self.level_down(session, 1);
                }
            }
        }

        if self.hp < 1 {
            self.die(session, cause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::item::Item;

    fn fresh() -> (Session, Player) {
        let mut session = Session::seeded(31);
        let player = Player::new(&mut session, "Tester", Default::default());
        (session, player)
    }

    fn hit(kind: DamageType, amount: i32) -> Damage {
        Damage::from_monster(MonsterKind::Orc, kind, AttackType::Weapon, amount)
    }

    #[test]
    fn test_armour_absorbs() {
        let (mut session, mut player) = fresh();
        player.hp = 5;
        let ac = player.armor_class();
        assert_eq!(ac, 3);

        player.take_damage(&mut session, hit(DamageType::Physical, 3), DeathCause::Monster(MonsterKind::Orc));
        assert_eq!(player.hp, 5);
        assert!(player.log.contains("Your armour protects you."));

        player.take_damage(&mut session, hit(DamageType::Physical, 5), DeathCause::Monster(MonsterKind::Orc));
        assert_eq!(player.hp, 3);
        assert!(player.log.contains("Ouch!"));
        assert!(!session.is_over());
    }

    #[test]
    fn test_resistances() {
        let (mut session, mut player) = fresh();
        let hp = player.hp;
        player.add_effect(&mut session, Effect::new(EffectKind::ResistFire).with_amount(10).with_turns(50));
        player.take_damage(&mut session, hit(DamageType::Fire, 8), DeathCause::Monster(MonsterKind::Orc));
        assert_eq!(player.hp, hp);
        assert!(player.log.contains("The flames don't phase you."));

        player.take_damage(&mut session, hit(DamageType::Cold, 2), DeathCause::Monster(MonsterKind::Orc));
        assert_eq!(player.hp, hp - 2);
        assert!(player.log.contains("You suffer from frostbite."));

        player.take_damage(&mut session, hit(DamageType::Electricity, 0), DeathCause::Monster(MonsterKind::Orc));
        assert!(player.log.contains("As you are grounded nothing happens."));
    }

    #[test]
    fn test_poison_tick_and_infliction() {
        let (mut session, mut player) = fresh();
        let hp = player.hp;
        let tick = Damage::new(DamageType::Poison, AttackType::Touch, 2, DamageSource::None);
        player.take_damage(&mut session, tick, DeathCause::Effect(EffectKind::Poison));
        assert_eq!(player.hp, hp - 2);
        assert!(!player.has_effect(EffectKind::Poison));

        // More poison than any constitution roll can resist
        player.take_damage(&mut session, hit(DamageType::Poison, 100), DeathCause::Monster(MonsterKind::Orc));
        assert!(player.has_effect(EffectKind::Poison));
        assert!(player.effect_magnitude(EffectKind::Poison) > 100 - player.constitution());
    }

    #[test]
    fn test_gaze_needs_sight() {
        let (mut session, mut player) = fresh();
        player.add_effect(&mut session, Effect::new(EffectKind::Blindness));
        let gaze = Damage::from_monster(MonsterKind::FloatingEye, DamageType::Paralysis, AttackType::Gaze, 200);
        let logged = player.log.len();
        player.take_damage(&mut session, gaze, DeathCause::Monster(MonsterKind::FloatingEye));
        assert!(!player.has_effect(EffectKind::Paralysis));
        assert_eq!(player.log.len(), logged);

        let (mut session, mut player) = fresh();
        player.take_damage(&mut session, gaze, DeathCause::Monster(MonsterKind::FloatingEye));
        assert!(player.has_effect(EffectKind::Paralysis));
    }

    #[test]
    fn test_resisted_status() {
        let (mut session, mut player) = fresh();
        player.take_damage(&mut session, hit(DamageType::Confusion, 0), DeathCause::Monster(MonsterKind::Orc));
        assert!(!player.has_effect(EffectKind::Confusion));
        assert!(player.log.contains("You are not confused."));

        player.take_damage(&mut session, hit(DamageType::DecStr, 1), DeathCause::Monster(MonsterKind::Orc));
        assert!(player.log.contains("You are not affected."));
    }

    #[test]
    fn test_strength_drain_is_fatal_at_zero() {
        let (mut session, mut player) = fresh();
        player.attributes.strength = 1;
        player.attributes.constitution = 0;
        player.take_damage(&mut session, hit(DamageType::DecStr, 150), DeathCause::Monster(MonsterKind::Orc));
        assert!(session.is_over());
        assert_eq!(
            session.game_over().map(|r| r.cause),
            Some(DeathCause::Effect(EffectKind::DecStr))
        );
    }

    #[test]
    fn test_drain_life() {
        let (mut session, mut player) = fresh();
        player.level_up(&mut session, 2);
        player.add_effect(&mut session, Effect::new(EffectKind::UndeadProtection).with_turns(20));
        player.take_damage(&mut session, hit(DamageType::DrainLife, 500), DeathCause::Monster(MonsterKind::Vampire));
        assert_eq!(player.level, 3);

        player.remove_effect(EffectKind::UndeadProtection);
        player.take_damage(&mut session, hit(DamageType::DrainLife, 500), DeathCause::Monster(MonsterKind::Vampire));
        assert_eq!(player.level, 2);
        assert!(player.log.contains("Your life energy is drained."));
    }

    #[test]
    fn test_amulet_of_power() {
        let (mut session, mut player) = fresh();
        let amulet = Item::new(session.next_item_id(), ItemKind::Amulet(AmuletKind::Power));
        let id = player.inventory.add(amulet);
        player.equip_item(id);
        let hp = player.hp;

        let mut cancelled = 0;
        for _ in 0..40 {
            let claw = Damage::from_monster(MonsterKind::DemonLordI, DamageType::Physical, AttackType::Claw, 4);
            player.take_damage(&mut session, claw, DeathCause::Monster(MonsterKind::DemonLordI));
            if player.hp == hp {
                cancelled += 1;
            }
            player.hp = hp;
        }
        assert!(cancelled > 15);
        assert!(player.log.contains("Your amulet cancels the type I demon lord's attack."));
    }

    #[test]
    fn test_fatal_damage() {
        let (mut session, mut player) = fresh();
        player.hp = 1;
        player.take_damage(&mut session, hit(DamageType::Acid, 5), DeathCause::Monster(MonsterKind::Orc));
        assert!(session.is_over());
        assert_eq!(
            session.game_over().map(|r| r.cause),
            Some(DeathCause::Monster(MonsterKind::Orc))
        );
    }
}
