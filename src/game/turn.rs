//! Turn management
//!
//! Spends the player's movement points and lets world turns pass, running
//! the per-turn effect handling in a fixed order.

use super::state::Session;
use crate::combat::damage::{AttackType, Damage, DamageSource, DamageType};
use crate::combat::status::EffectKind;
use crate::entities::attributes::SPEED_NORMAL;
use crate::entities::player::Player;
use crate::game::death::DeathCause;
use crate::items::equipment::EquipSlot;

/// Turns between regeneration ticks before difficulty scaling
const REGEN_INTERVAL: i32 = 22;
/// Turns between poison ticks before difficulty scaling
const POISON_INTERVAL: i32 = 22;

impl Player {
    /// Spend an action lasting `turns` turns
    pub fn make_move(&mut self, session: &mut Session, turns: u32) {
        let frequency = session.difficulty.regen_frequency();

        for _ in 0..turns.max(1) {
            if session.is_over() {
                return;
            }

            if self.movement >= SPEED_NORMAL {
                self.movement -= SPEED_NORMAL;
            }
            // Extra moves left over, the world waits
            if self.movement >= SPEED_NORMAL {
                continue;
            }

            if self.has_effect(EffectKind::TimeStop) {
                self.movement += self.speed();
                let expired = self
                    .effects
                    .get_mut(EffectKind::TimeStop)
                    .map(|effect| effect.expire())
                    .unwrap_or(true);
                if !expired {
                    continue;
                }
                self.remove_effect(EffectKind::TimeStop);
            }

            session.spin_the_wheel();
            self.movement += self.speed();
            self.log.set_time(session.turn);

            self.expire_effects();
            self.regenerate(frequency);
            self.poison_tick(session, frequency);
            if session.is_over() {
                return;
            }
            self.clumsiness_tick(session);
            self.itching_tick(session);
        }
    }

    fn regenerate(&mut self, frequency: i32) {
        if self.regen_counter > 0 {
            self.regen_counter -= 1;
            return;
        }
        self.regen_counter = REGEN_INTERVAL + frequency;

        if self.hp < self.hp_max() {
            let regen = 1 + self.effect_magnitude(EffectKind::IncHpRegen)
                - self.effect_magnitude(EffectKind::DecHpRegen);
            self.hp_gain(regen.max(0));
        }
        if self.mp < self.mp_max() {
            let regen = 1 + self.effect_magnitude(EffectKind::IncMpRegen)
                - self.effect_magnitude(EffectKind::DecMpRegen);
            self.mp_gain(regen.max(0));
        }
    }

    fn poison_tick(&mut self, session: &mut Session, frequency: i32) {
        let Some(poison) = self.effects.get(EffectKind::Poison) else {
            return;
        };
        let period = (POISON_INTERVAL - frequency).max(1) as u64;
        if session.turn.saturating_sub(poison.start) % period != 0 {
            return;
        }
        let damage = Damage::new(
            DamageType::Poison,
            AttackType::Touch,
            poison.amount,
            DamageSource::None,
        );
        self.take_damage(session, damage, DeathCause::Effect(EffectKind::Poison));
    }

    fn clumsiness_tick(&mut self, session: &mut Session) {
        if !self.has_effect(EffectKind::Clumsiness) || !session.rng.chance(33) {
            return;
        }
        let Some(id) = self.equipment.get(EquipSlot::Weapon) else {
            return;
        };

        self.log.mute();
        let time = self.unequip_item(id);
        self.log.unmute();
        if time == 0 {
            return;
        }

        if let Some(msg) = EffectKind::Clumsiness.info().msg_start {
            self.log.add(msg);
        }
        self.drop_item(session, id);
    }

    fn itching_tick(&mut self, session: &mut Session) {
        if !self.has_effect(EffectKind::Itching) || !session.rng.chance(50) {
            return;
        }
        let Some(slot) = self.random_armour_slot(&mut session.rng) else {
            return;
        };
        let Some(id) = self.force_unequip(slot) else {
            return;
        };

        if let Some(msg) = EffectKind::Itching.info().msg_start {
            self.log.add(msg);
        }
        self.drop_item(session, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::Effect;
    use crate::world::Position;

    fn player() -> (Session, Player) {
        let mut session = Session::seeded(51);
        let mut player = Player::new(&mut session, "Walker", Default::default());
        player.pos = Position::new(5, 5, 1);
        (session, player)
    }

    #[test]
    fn test_each_turn_advances_world() {
        let (mut session, mut player) = player();
        let start = session.turn;
        player.make_move(&mut session, 3);
        assert_eq!(session.turn, start + 3);
        assert_eq!(player.movement, player.speed());
    }

    #[test]
    fn test_fast_player_gets_extra_moves() {
        let (mut session, mut player) = player();
        player.movement = 2 * SPEED_NORMAL;
        let start = session.turn;
        player.make_move(&mut session, 1);
        assert_eq!(session.turn, start);
        player.make_move(&mut session, 1);
        assert_eq!(session.turn, start + 1);
    }

    #[test]
    fn test_time_stop_freezes_world() {
        let (mut session, mut player) = player();
        player.add_effect(&mut session, Effect::new(EffectKind::TimeStop).with_turns(3));
        player.add_effect(&mut session, Effect::new(EffectKind::Confusion).with_turns(10));
        let start = session.turn;

        player.make_move(&mut session, 2);
        assert_eq!(session.turn, start);
        assert_eq!(player.effects.get(EffectKind::Confusion).map(|e| e.turns), Some(10));

        player.make_move(&mut session, 1);
        assert!(!player.has_effect(EffectKind::TimeStop));
        assert_eq!(session.turn, start + 1);
        assert_eq!(player.effects.get(EffectKind::Confusion).map(|e| e.turns), Some(9));
    }

    #[test]
    fn test_regeneration() {
        let (mut session, mut player) = player();
        player.hp = 1;
        player.regen_counter = 0;
        player.make_move(&mut session, 1);
        assert_eq!(player.hp, 2);
        assert_eq!(player.regen_counter, REGEN_INTERVAL);

        player.add_effect(&mut session, Effect::new(EffectKind::IncHpRegen).with_amount(4).with_turns(100));
        player.regen_counter = 0;
        player.make_move(&mut session, 1);
        assert_eq!(player.hp, 7);

        player.add_effect(&mut session, Effect::new(EffectKind::DecHpRegen).with_amount(9).with_turns(100));
        player.regen_counter = 0;
        player.make_move(&mut session, 1);
        assert_eq!(player.hp, 7);
    }

    #[test]
    fn test_poison_ticks() {
        let (mut session, mut player) = player();
        player.regen_counter = 1000;
        player.add_effect(&mut session, Effect::new(EffectKind::Poison).with_amount(2).with_turns(200));
        let hp = player.hp;
        player.make_move(&mut session, POISON_INTERVAL as u32);
        assert_eq!(player.hp, hp - 2);
    }

    #[test]
    fn test_poison_can_kill() {
        let (mut session, mut player) = player();
        player.regen_counter = 1000;
        player.hp = 1;
        player.add_effect(&mut session, Effect::new(EffectKind::Poison).with_amount(5).with_turns(200));
        player.make_move(&mut session, 100);
        assert!(session.is_over());
        assert_eq!(
            session.game_over().map(|r| r.cause),
            Some(DeathCause::Effect(EffectKind::Poison))
        );
        assert!(session.game_over().map(|r| r.description.ends_with("by poison.")).unwrap_or(false));
    }

    #[test]
    fn test_clumsiness_drops_weapon() {
        let (mut session, mut player) = player();
        player.add_effect(&mut session, Effect::new(EffectKind::Clumsiness));
        let weapon = player.equipment.get(EquipSlot::Weapon).expect("dagger");
        player.make_move(&mut session, 50);
        assert!(player.equipment.get(EquipSlot::Weapon).is_none());
        assert!(!player.inventory.contains(weapon));
        let floor = session.dungeon.level(1).expect("level").items_at(player.pos);
        assert!(floor.iter().any(|item| item.id == weapon));
    }

    #[test]
    fn test_itching_drops_armour() {
        let (mut session, mut player) = player();
        player.add_effect(&mut session, Effect::new(EffectKind::Itching));
        let armour = player.equipment.get(EquipSlot::Suit).expect("armour");
        player.make_move(&mut session, 50);
        assert!(player.equipment.get(EquipSlot::Suit).is_none());
        assert!(!player.inventory.contains(armour));
    }
}
