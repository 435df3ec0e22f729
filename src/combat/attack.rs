//! Melee attacks
//!
//! The player's to-hit roll, weapon damage and the special weapons.

use crate::combat::damage::{AttackType, Damage, DamageSource, DamageType};
use crate::combat::status::EffectKind;
use crate::entities::player::Player;
use crate::game::state::Session;
use crate::items::equipment::EquipSlot;
use crate::items::item::{AmuletKind, ItemKind, WeaponKind};
use crate::world::Position;

/// Damage dealt by the lance of death or Slayer to a vulnerable target
const ARTIFACT_KILL: i32 = 10000;
/// Lance of death against demons
const LANCE_VS_DEMON: i32 = 300;
/// Percent chance for the Vorpal Blade to behead
const BEHEAD_CHANCE: i32 = 5;

impl Player {
    fn wielded_kind(&self) -> Option<WeaponKind> {
        match self.equipped_item(EquipSlot::Weapon).map(|item| item.kind) {
            Some(ItemKind::Weapon(kind)) => Some(kind),
            _ => None,
        }
    }

    /// Attack the monster at `target`. Returns the turns used.
    pub fn attack(&mut self, session: &mut Session, target: Position) -> u32 {
        let z = self.pos.z;
        let Some(monster) = session
            .dungeon
            .level(z)
            .and_then(|map| map.monster_at(target))
            .cloned()
        else {
            return 0;
        };

        let difficulty = session.difficulty_scalar();
        let weapon_wc = self
            .equipped_item(EquipSlot::Weapon)
            .map(|item| item.weapon_wc())
            .unwrap_or(0);
        let to_hit = self.level as i32 + self.dexterity() + weapon_wc / 4
            - monster.armor_class()
            - 12
            - difficulty;

        let roll = session.rng.rand_1n(21);
        if roll > to_hit && roll != 1 {
            if self.pos_visible(target) {
                self.log.add(format!("You miss the {}.", monster.name()));
            }
            return 1;
        }

        self.log.add(format!("You hit the {}.", monster.name()));

        let base = (self.strength() + self.weapon_class() - 12 - difficulty).max(0);
        let mut damage = Damage::new(
            DamageType::Physical,
            AttackType::Weapon,
            session.rng.rand_1n(base + 1),
            DamageSource::Player,
        );

        if monster.kind.is_metallivore() {
            self.rust_weapon();
        }

        if self.has_effect(EffectKind::Stealth) {
            self.remove_effect(EffectKind::Stealth);
        }

        if monster.kind.is_dragon() && self.wears_amulet(AmuletKind::DragonSlaying) {
            damage.amount *= 3;
        }

        let weapon = self.wielded_kind();
        match weapon {
            Some(WeaponKind::VorpalBlade)
                if monster.is_beheadable() && session.rng.chance(BEHEAD_CHANCE) =>
            {
                self.log.add(format!(
                    "You behead the {} with your Vorpal Blade!",
                    monster.name()
                ));
                damage.amount = monster.hp + monster.armor_class();
            }
            Some(WeaponKind::LanceOfDeath) => {
                damage.amount = if monster.kind.is_demon() {
                    LANCE_VS_DEMON
                } else {
                    ARTIFACT_KILL
                };
            }
            Some(WeaponKind::Slayer) if monster.kind.is_demon() => {
                damage.amount = ARTIFACT_KILL;
            }
            _ => {}
        }

        let Some(map) = session.dungeon.level_mut(z) else {
            return 1;
        };
        let Some(target_monster) = map.monster_at_mut(target) else {
            return 1;
        };
        target_monster.effects.remove(EffectKind::HoldMonster);
        let killed = target_monster.take_damage(&damage);

        if killed {
            map.remove_monster_at(target);
            self.log.add(format!("You kill the {}.", monster.name()));
            self.stats.record_kill(monster.kind);
            log::debug!("{} killed {:?} at {}", self.name, monster.kind, target);
            self.gain_exp(session, monster.kind.data().exp);
            return 1;
        }

        if weapon == Some(WeaponKind::LanceOfDeath) {
            self.log.add(format!(
                "Your lance of death tickles the {}!",
                monster.name()
            ));
        }

        // An invisible attacker still gives away where the blow came from
        if self.has_effect(EffectKind::Invisibility) && !monster.has_infravision() {
            target_monster.update_player_pos(self.pos);
        }

        1
    }

    /// Corrode the wielded weapon; it falls apart at the last stage
    fn rust_weapon(&mut self) {
        let Some(id) = self.equipment.get(EquipSlot::Weapon) else {
            return;
        };
        let type_known = self
            .inventory
            .get(id)
            .map(|item| self.item_type_known(item))
            .unwrap_or(false);
        let Some(item) = self.inventory.get_mut(id) else {
            return;
        };
        if !item.is_metal() {
            return;
        }
        let destroyed = item.rust();
        let desc = item.describe(type_known);

        if destroyed {
            self.log.add(format!("Your {} disintegrates!", desc));
            self.force_unequip(EquipSlot::Weapon);
            self.remove_from_inventory(id);
        } else {
            self.log.add(format!("Your {} rusts.", desc));
        }
    }
}
